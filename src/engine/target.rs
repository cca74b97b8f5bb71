use std::fmt;

/// Stable identity of a falling word, assigned at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source of target ids. Ids only name targets: they need not be ordered,
/// and an id that collides with a live target is redrawn by the engine.
pub trait IdGenerator {
    fn next_id(&mut self) -> TargetId;
}

/// Monotonic counter starting at 1.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    last: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TargetId {
        self.last += 1;
        TargetId(self.last)
    }
}

/// Engine-space coordinates; `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug)]
pub struct WordTarget {
    pub id: TargetId,
    text: Vec<char>,
    typed_len: usize,
    pub position: Position,
    /// Units per second, refreshed from the engine every tick.
    pub speed: f64,
}

impl WordTarget {
    pub fn new(id: TargetId, text: &str, position: Position, speed: f64) -> Self {
        Self {
            id,
            text: text.chars().collect(),
            typed_len: 0,
            position,
            speed,
        }
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.text
    }

    /// The prefix of the word typed so far.
    pub fn typed(&self) -> &[char] {
        &self.text[..self.typed_len]
    }

    pub fn remaining(&self) -> &[char] {
        &self.text[self.typed_len..]
    }

    pub fn typed_len(&self) -> usize {
        self.typed_len
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn next_char(&self) -> Option<char> {
        self.text.get(self.typed_len).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.typed_len >= self.text.len()
    }

    pub fn progress(&self) -> f64 {
        if self.text.is_empty() {
            return 0.0;
        }
        self.typed_len as f64 / self.text.len() as f64
    }

    /// Advances the typed prefix if `ch` is the next expected character.
    /// Returns whether the character was accepted.
    pub(crate) fn accept(&mut self, ch: char) -> bool {
        if self.next_char() == Some(ch) {
            self.typed_len += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn retract(&mut self) -> bool {
        if self.typed_len == 0 {
            return false;
        }
        self.typed_len -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(text: &str) -> WordTarget {
        WordTarget::new(TargetId(1), text, Position::default(), 40.0)
    }

    #[test]
    fn test_sequential_ids_are_unique_and_increasing() {
        let mut ids = SequentialIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_eq!(a, TargetId(1));
        assert!(b > a);
    }

    #[test]
    fn test_accept_only_next_char() {
        let mut t = target("echo");
        assert!(!t.accept('c'));
        assert!(t.accept('e'));
        assert_eq!(t.typed(), &['e']);
        assert_eq!(t.next_char(), Some('c'));
        assert_eq!(t.remaining().len(), 3);
    }

    #[test]
    fn test_retract_on_empty_prefix() {
        let mut t = target("kilo");
        assert!(!t.retract());
        t.accept('k');
        assert!(t.retract());
        assert_eq!(t.typed_len(), 0);
    }

    #[test]
    fn test_complete_and_progress() {
        let mut t = target("ai");
        assert_eq!(t.progress(), 0.0);
        t.accept('a');
        assert_eq!(t.progress(), 0.5);
        t.accept('i');
        assert!(t.is_complete());
        assert_eq!(t.next_char(), None);
    }
}
