use std::fmt;

/// Lower bound for the spawn interval, in seconds.
pub const MIN_SPAWN_INTERVAL: f64 = 0.7;

const BASE_SPEED: f64 = 52.0;
const SPEED_PER_LEVEL: f64 = 9.0;
const BASE_SPAWN_INTERVAL: f64 = 1.8;
const SPAWN_DECREMENT_PER_LEVEL: f64 = 0.07;

/// Three ordered tiers. Harder tiers fall faster and spawn more often.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    #[default]
    Classic,
    Hard,
    Insane,
}

pub const ALL_DIFFICULTIES: [Difficulty; 3] =
    [Difficulty::Classic, Difficulty::Hard, Difficulty::Insane];

impl Difficulty {
    /// Accepts both label sets that have been used for the tiers
    /// (`classic/hard/insane` and `easy/medium/hard`). Unknown or empty
    /// input falls back to [`Difficulty::Classic`].
    ///
    /// `hard` is ambiguous between the two sets; it resolves to the middle tier.
    pub fn parse_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" | "easy" => Difficulty::Classic,
            "hard" | "medium" => Difficulty::Hard,
            "insane" => Difficulty::Insane,
            _ => Difficulty::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Classic => "classic",
            Difficulty::Hard => "hard",
            Difficulty::Insane => "insane",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Classic => "Classic",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
        }
    }

    fn speed_multiplier(self) -> f64 {
        match self {
            Difficulty::Classic => 0.8,
            Difficulty::Hard => 1.2,
            Difficulty::Insane => 1.6,
        }
    }

    fn spawn_multiplier(self) -> f64 {
        match self {
            Difficulty::Classic => 1.4,
            Difficulty::Hard => 1.0,
            Difficulty::Insane => 0.6,
        }
    }

    /// Fall speed in engine units per second at `level` (levels start at 1).
    pub fn speed(self, level: u32) -> f64 {
        let mul = self.speed_multiplier();
        let steps = level.max(1) - 1;
        BASE_SPEED * mul + steps as f64 * SPEED_PER_LEVEL * mul
    }

    /// Seconds between spawns at `level`, never below [`MIN_SPAWN_INTERVAL`].
    pub fn spawn_interval(self, level: u32) -> f64 {
        let steps = level.max(1) - 1;
        let base = BASE_SPAWN_INTERVAL * self.spawn_multiplier();
        (base - steps as f64 * SPAWN_DECREMENT_PER_LEVEL).max(MIN_SPAWN_INTERVAL)
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Classic => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Insane,
            Difficulty::Insane => Difficulty::Classic,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Classic => Difficulty::Insane,
            Difficulty::Hard => Difficulty::Classic,
            Difficulty::Insane => Difficulty::Hard,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
