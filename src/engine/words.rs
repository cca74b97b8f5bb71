use std::collections::{BTreeMap, HashMap};

use log::{debug, trace, warn};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::engine::difficulty::Difficulty;
use crate::engine::scoring;
use crate::engine::target::{IdGenerator, Position, SequentialIds, TargetId, WordTarget};
use crate::generator::vocabulary::Vocabulary;

/// Smallest x a word can spawn at.
pub const SPAWN_LEFT: f64 = 16.0;
/// Room kept free on the right edge so words stay on screen.
pub const SPAWN_RIGHT_MARGIN: f64 = 100.0;
/// Spawn height, just above the visible top edge.
pub const SPAWN_Y: f64 = -20.0;
/// A word is lost once `y >= height - BOTTOM_MARGIN`.
pub const BOTTOM_MARGIN: f64 = 20.0;
/// Width reserved per character when placing a word, so it fits on screen.
pub const CHAR_WIDTH: f64 = 10.0;

/// Draws allowed from the id generator before a live id is bumped instead.
const MAX_ID_DRAWS: usize = 8;

/// Result of a single keystroke.
#[derive(Clone, Debug, PartialEq)]
pub enum KeystrokeOutcome {
    /// No live target accepted the letter. Nothing changed.
    NoHit,
    /// The letter extended a target's typed prefix; the target stays locked.
    PartialHit { id: TargetId },
    /// The letter finished a word, which has been removed.
    Kill {
        id: TargetId,
        text: String,
        score_delta: u64,
        position: Position,
    },
}

impl KeystrokeOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, KeystrokeOutcome::NoHit)
    }
}

/// Spawns falling words, moves them, and resolves keystrokes against them.
///
/// Live targets are kept in spawn order under an engine-owned sequence
/// number; ids from the generator only name them. At most one target is
/// "active" (locked); while it is alive it receives every keystroke.
pub struct WordEngine<R = SmallRng, G = SequentialIds> {
    vocabulary: Vocabulary,
    targets: BTreeMap<u64, WordTarget>,
    index: HashMap<TargetId, u64>,
    next_seq: u64,
    active: Option<TargetId>,
    spawn_timer: f64,
    spawn_interval: f64,
    speed: f64,
    level: u32,
    difficulty: Difficulty,
    missed: u32,
    rng: R,
    ids: G,
}

impl WordEngine {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_sources(vocabulary, SmallRng::from_entropy(), SequentialIds::default())
    }
}

impl<R: Rng, G: IdGenerator> WordEngine<R, G> {
    /// Builds an engine with an explicit randomness source and id generator.
    pub fn with_sources(vocabulary: Vocabulary, rng: R, ids: G) -> Self {
        let mut engine = Self {
            vocabulary,
            targets: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
            active: None,
            spawn_timer: 0.0,
            spawn_interval: 0.0,
            speed: 0.0,
            level: 1,
            difficulty: Difficulty::default(),
            missed: 0,
            rng,
            ids,
        };
        engine.set_level(1);
        engine
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.set_level(self.level);
    }

    /// Like [`set_difficulty`](Self::set_difficulty), from a mode name.
    /// Unknown names select the default tier.
    pub fn set_difficulty_name(&mut self, name: &str) {
        self.set_difficulty(Difficulty::parse_or_default(name));
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
        self.speed = self.difficulty.speed(self.level);
        self.spawn_interval = self.difficulty.spawn_interval(self.level);
    }

    /// Clears the board for a new game and returns to level 1.
    pub fn reset(&mut self) {
        self.targets.clear();
        self.index.clear();
        self.active = None;
        self.spawn_timer = 0.0;
        self.missed = 0;
        self.set_level(1);
    }

    /// Returns the number of words lost since the last call and zeroes it.
    pub fn consume_missed(&mut self) -> u32 {
        std::mem::take(&mut self.missed)
    }

    /// Spawns a random word at a random x inside `width`, just above the top.
    ///
    /// The right bound leaves room for the whole word, never less than
    /// [`SPAWN_RIGHT_MARGIN`].
    pub fn spawn(&mut self, width: f64) -> TargetId {
        let text = self.vocabulary.choose(&mut self.rng).to_string();
        let x = self.spawn_x(width, text.chars().count());
        self.spawn_at(&text, Position { x, y: SPAWN_Y })
    }

    fn spawn_x(&mut self, width: f64, len: usize) -> f64 {
        let margin = SPAWN_RIGHT_MARGIN.max(len as f64 * CHAR_WIDTH);
        let max_x = width - margin;
        if max_x > SPAWN_LEFT {
            self.rng.gen_range(SPAWN_LEFT..=max_x)
        } else {
            SPAWN_LEFT
        }
    }

    /// Places a specific word at `position` with the current speed.
    pub fn spawn_at(&mut self, text: &str, position: Position) -> TargetId {
        let id = self.fresh_id();
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!("spawn {id} {text:?} at ({:.1}, {:.1})", position.x, position.y);
        self.targets
            .insert(seq, WordTarget::new(id, text, position, self.speed));
        self.index.insert(id, seq);
        id
    }

    /// Next generator id not held by a live target. A generator that keeps
    /// repeating live ids gets its last id bumped until it is free.
    fn fresh_id(&mut self) -> TargetId {
        let mut id = self.ids.next_id();
        for _ in 1..MAX_ID_DRAWS {
            if !self.index.contains_key(&id) {
                return id;
            }
            id = self.ids.next_id();
        }
        if self.index.contains_key(&id) {
            warn!("id generator keeps repeating live id {id}");
            while self.index.contains_key(&id) {
                id = TargetId(id.0.wrapping_add(1));
            }
        }
        id
    }

    /// Advances the game by `dt` seconds on a `width` x `height` field.
    ///
    /// At most one word spawns per call: the timer is reset rather than
    /// carrying over the overshoot.
    pub fn update(&mut self, dt: f64, width: f64, height: f64) {
        let dt = dt.max(0.0);

        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn(width);
            self.spawn_timer = self.spawn_interval;
        }

        let speed = self.speed;
        let floor = height - BOTTOM_MARGIN;
        let active = &mut self.active;
        let missed = &mut self.missed;
        let index = &mut self.index;
        self.targets.retain(|_, target| {
            target.speed = speed;
            target.position.y += speed * dt;
            if target.position.y < floor {
                return true;
            }
            let id = target.id;
            debug!("missed {id} {:?}", target.text());
            *missed += 1;
            index.remove(&id);
            if *active == Some(id) {
                *active = None;
            }
            false
        });
    }

    /// Resolves one typed letter.
    ///
    /// A live active target takes the letter or rejects it. Without one, the
    /// letter locks onto the lowest word (greatest y) whose next expected
    /// character matches; ties go to the earliest spawn.
    pub fn type_letter(&mut self, letter: char) -> KeystrokeOutcome {
        let id = match self.active.filter(|id| self.index.contains_key(id)) {
            Some(id) => id,
            None => {
                self.active = None;
                match self.lowest_candidate(letter) {
                    Some(id) => {
                        trace!("lock {id} on {letter:?}");
                        self.active = Some(id);
                        id
                    }
                    None => return KeystrokeOutcome::NoHit,
                }
            }
        };

        let Some(&seq) = self.index.get(&id) else {
            return KeystrokeOutcome::NoHit;
        };
        let Some(target) = self.targets.get_mut(&seq) else {
            return KeystrokeOutcome::NoHit;
        };
        if !target.accept(letter) {
            trace!("{letter:?} rejected by locked {id}");
            return KeystrokeOutcome::NoHit;
        }
        if !target.is_complete() {
            return KeystrokeOutcome::PartialHit { id };
        }

        let position = target.position;
        let score_delta = scoring::kill_score(target.len());
        let text = target.text();
        self.targets.remove(&seq);
        self.index.remove(&id);
        if self.active == Some(id) {
            self.active = None;
        }
        debug!("killed {id} {text:?} for {score_delta}");
        KeystrokeOutcome::Kill {
            id,
            text,
            score_delta,
            position,
        }
    }

    /// Removes the last typed character of the active target.
    /// Returns `false` when there is no active target or nothing is typed.
    pub fn backspace(&mut self) -> bool {
        let seq = self.active.and_then(|id| self.index.get(&id).copied());
        match seq.and_then(|seq| self.targets.get_mut(&seq)) {
            Some(target) => target.retract(),
            None => false,
        }
    }

    fn lowest_candidate(&self, letter: char) -> Option<TargetId> {
        let mut best: Option<&WordTarget> = None;
        for target in self.targets.values() {
            if target.next_char() != Some(letter) {
                continue;
            }
            if best.is_none_or(|b| target.position.y > b.position.y) {
                best = Some(target);
            }
        }
        best.map(|t| t.id)
    }

    pub fn active_target(&self) -> Option<&WordTarget> {
        self.active.and_then(|id| self.target(id))
    }

    pub fn active_id(&self) -> Option<TargetId> {
        self.active_target().map(|t| t.id)
    }

    /// Live targets in spawn order.
    pub fn targets(&self) -> impl Iterator<Item = &WordTarget> {
        self.targets.values()
    }

    pub fn target(&self, id: TargetId) -> Option<&WordTarget> {
        self.index.get(&id).and_then(|seq| self.targets.get(seq))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn spawn_interval(&self) -> f64 {
        self.spawn_interval
    }

    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    pub fn pending_missed(&self) -> u32 {
        self.missed
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}
