use std::time::Instant;

use log::info;
use rand::Rng;

use crate::engine::difficulty::Difficulty;
use crate::engine::scoring;
use crate::engine::target::{IdGenerator, Position};
use crate::engine::words::{KeystrokeOutcome, WordEngine};

/// Seconds a kill marker stays on screen.
pub const BURST_TTL: f64 = 0.5;

/// Short-lived marker left where a word was destroyed.
#[derive(Clone, Debug, PartialEq)]
pub struct Burst {
    pub position: Position,
    pub text: String,
    pub ttl: f64,
}

/// One run of the game: the word engine plus score, lives and progression.
pub struct GameSession<R = rand::rngs::SmallRng, G = crate::engine::target::SequentialIds> {
    pub engine: WordEngine<R, G>,
    pub score: u64,
    pub lives: u32,
    pub words_killed: u32,
    pub words_missed: u32,
    pub keystrokes: u32,
    pub hits: u32,
    pub bursts: Vec<Burst>,
    pub started_at: Instant,
    pub finished_at: Option<Instant>,
}

impl<R: Rng, G: IdGenerator> GameSession<R, G> {
    pub fn new(mut engine: WordEngine<R, G>, difficulty: Difficulty, lives: u32) -> Self {
        engine.set_difficulty(difficulty);
        engine.reset();
        info!("game start: {difficulty}, {lives} lives");
        Self {
            engine,
            score: 0,
            lives,
            words_killed: 0,
            words_missed: 0,
            keystrokes: 0,
            hits: 0,
            bursts: Vec::new(),
            started_at: Instant::now(),
            finished_at: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.engine.difficulty()
    }

    pub fn level(&self) -> u32 {
        self.engine.level()
    }

    /// Advances one frame. Misses cost a life each; the run ends at zero.
    pub fn tick(&mut self, dt: f64, width: f64, height: f64) {
        if self.is_over() {
            return;
        }

        self.engine.update(dt, width, height);

        let missed = self.engine.consume_missed();
        if missed > 0 {
            self.words_missed += missed;
            self.lives = self.lives.saturating_sub(missed);
            if self.lives == 0 {
                self.finish();
            }
        }

        for burst in &mut self.bursts {
            burst.ttl -= dt.max(0.0);
        }
        self.bursts.retain(|b| b.ttl > 0.0);
    }

    pub fn type_char(&mut self, ch: char) -> KeystrokeOutcome {
        if self.is_over() {
            return KeystrokeOutcome::NoHit;
        }

        self.keystrokes += 1;
        let outcome = self.engine.type_letter(ch);
        if outcome.is_hit() {
            self.hits += 1;
        }
        if let KeystrokeOutcome::Kill {
            ref text,
            score_delta,
            position,
            ..
        } = outcome
        {
            self.score += score_delta;
            self.words_killed += 1;
            self.bursts.push(Burst {
                position,
                text: text.clone(),
                ttl: BURST_TTL,
            });
            let level = scoring::level_from_score(self.score);
            if level != self.engine.level() {
                info!("level up: {level}");
                self.engine.set_level(level);
            }
        }
        outcome
    }

    pub fn backspace(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.engine.backspace()
    }

    /// Ends the run early (player quit) or after the last life is lost.
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
            info!(
                "game over: score {} level {} killed {} missed {}",
                self.score,
                self.engine.level(),
                self.words_killed,
                self.words_missed
            );
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.keystrokes == 0 {
            return 100.0;
        }
        (self.hits as f64 / self.keystrokes as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn elapsed_secs(&self) -> f64 {
        match self.finished_at {
            Some(end) => end.duration_since(self.started_at).as_secs_f64(),
            None => self.started_at.elapsed().as_secs_f64(),
        }
    }

    pub fn next_level_in(&self) -> Option<u64> {
        scoring::score_to_next_level(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::target::SequentialIds;
    use crate::generator::vocabulary::Vocabulary;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn session(lives: u32) -> GameSession {
        let vocab = Vocabulary::from_words(["echo", "kilo"]).unwrap();
        let engine =
            WordEngine::with_sources(vocab, SmallRng::seed_from_u64(1), SequentialIds::default());
        GameSession::new(engine, Difficulty::Hard, lives)
    }

    fn at(y: f64) -> Position {
        Position { x: 40.0, y }
    }

    #[test]
    fn test_new_session_applies_difficulty() {
        let s = session(3);
        assert_eq!(s.difficulty(), Difficulty::Hard);
        assert_eq!(s.level(), 1);
        assert_eq!(s.accuracy(), 100.0);
        assert!(!s.is_over());
    }

    #[test]
    fn test_kill_scores_and_leaves_burst() {
        let mut s = session(3);
        s.engine.spawn_at("echo", at(80.0));
        for ch in "echo".chars() {
            s.type_char(ch);
        }
        assert_eq!(s.score, 15);
        assert_eq!(s.words_killed, 1);
        assert_eq!(s.bursts.len(), 1);
        assert_eq!(s.bursts[0].position, at(80.0));

        s.tick(BURST_TTL + 0.01, 10_000.0, 10_000.0);
        assert!(s.bursts.is_empty());
    }

    #[test]
    fn test_misses_cost_lives_and_end_game() {
        let mut s = session(2);
        s.engine.spawn_at("echo", at(500.0));
        s.engine.spawn_at("kilo", at(500.0));
        s.tick(0.1, 800.0, 500.0);
        assert_eq!(s.words_missed, 2);
        assert_eq!(s.lives, 0);
        assert!(s.is_over());
        assert_eq!(s.type_char('e'), KeystrokeOutcome::NoHit);
    }

    #[test]
    fn test_accuracy_counts_misfires() {
        let mut s = session(3);
        s.engine.spawn_at("kilo", at(10.0));
        s.type_char('k');
        s.type_char('x');
        assert_eq!(s.keystrokes, 2);
        assert_eq!(s.accuracy(), 50.0);
    }

    #[test]
    fn test_level_follows_score() {
        let mut s = session(3);
        s.score = scoring::SCORE_PER_LEVEL - 10;
        s.engine.spawn_at("echo", at(10.0));
        for ch in "echo".chars() {
            s.type_char(ch);
        }
        assert_eq!(s.level(), 2);
        assert_eq!(s.engine.speed(), Difficulty::Hard.speed(2));
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut s = session(3);
        s.finish();
        let first = s.finished_at;
        s.finish();
        assert_eq!(s.finished_at, first);
        assert!(!s.backspace());
    }
}
