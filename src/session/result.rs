use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::target::IdGenerator;
use crate::session::game::GameSession;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameResult {
    pub mode: String,
    pub score: u64,
    pub level: u32,
    pub words_killed: u32,
    pub words_missed: u32,
    pub keystrokes: u32,
    pub accuracy: f64,
    pub elapsed_secs: f64,
    pub timestamp: DateTime<Utc>,
}

impl GameResult {
    pub fn from_session<R: Rng, G: IdGenerator>(session: &GameSession<R, G>) -> Self {
        Self {
            mode: session.difficulty().as_str().to_string(),
            score: session.score,
            level: session.level(),
            words_killed: session.words_killed,
            words_missed: session.words_missed,
            keystrokes: session.keystrokes,
            accuracy: session.accuracy(),
            elapsed_secs: session.elapsed_secs(),
            timestamp: Utc::now(),
        }
    }

    /// Finished words per minute of play.
    pub fn words_per_minute(&self) -> f64 {
        if self.elapsed_secs < 1.0 {
            return 0.0;
        }
        self.words_killed as f64 / (self.elapsed_secs / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::difficulty::Difficulty;
    use crate::engine::target::Position;
    use crate::engine::words::WordEngine;
    use crate::generator::vocabulary::Vocabulary;

    #[test]
    fn test_from_session_copies_stats() {
        let vocab = Vocabulary::from_words(["tango"]).unwrap();
        let mut session = GameSession::new(WordEngine::new(vocab), Difficulty::Insane, 3);
        session.engine.spawn_at("tango", Position { x: 20.0, y: 0.0 });
        for ch in "tango".chars() {
            session.type_char(ch);
        }
        session.finish();

        let result = GameResult::from_session(&session);
        assert_eq!(result.mode, "insane");
        assert_eq!(result.score, 20);
        assert_eq!(result.words_killed, 1);
        assert_eq!(result.keystrokes, 5);
        assert_eq!(result.accuracy, 100.0);
    }

    #[test]
    fn test_wpm_needs_elapsed_time() {
        let mut result = GameResult {
            mode: "classic".to_string(),
            score: 0,
            level: 1,
            words_killed: 30,
            words_missed: 0,
            keystrokes: 0,
            accuracy: 100.0,
            elapsed_secs: 0.5,
            timestamp: Utc::now(),
        };
        assert_eq!(result.words_per_minute(), 0.0);
        result.elapsed_secs = 60.0;
        assert_eq!(result.words_per_minute(), 30.0);
    }
}
