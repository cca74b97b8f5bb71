pub mod game_over;
pub mod high_scores;
pub mod hud;
pub mod menu;
pub mod playfield;
