/// Points awarded per finished word, before the length bonus.
pub const BASE_KILL_SCORE: u64 = 10;
/// Bonus per character beyond the third.
pub const LENGTH_BONUS: u64 = 5;
/// Score needed per level step.
pub const SCORE_PER_LEVEL: u64 = 150;
pub const MAX_LEVEL: u32 = 30;

/// Score for finishing a word of `len` characters: 10 + 5 per char beyond 3.
pub fn kill_score(len: usize) -> u64 {
    BASE_KILL_SCORE + len.saturating_sub(3) as u64 * LENGTH_BONUS
}

pub fn level_from_score(score: u64) -> u32 {
    let level = 1 + score / SCORE_PER_LEVEL;
    level.min(MAX_LEVEL as u64) as u32
}

pub fn score_to_next_level(score: u64) -> Option<u64> {
    let level = level_from_score(score);
    if level >= MAX_LEVEL {
        return None;
    }
    Some(level as u64 * SCORE_PER_LEVEL - score)
}
