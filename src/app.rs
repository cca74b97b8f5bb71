use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use log::{info, warn};
use ratatui::layout::Rect;

use crate::config::Config;
use crate::engine::difficulty::Difficulty;
use crate::engine::words::{KeystrokeOutcome, WordEngine};
use crate::generator::vocabulary::Vocabulary;
use crate::session::game::GameSession;
use crate::session::result::GameResult;
use crate::store::json_store::JsonStore;
use crate::store::schema::{HighScoresData, SubmitOutcome};
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::layout::{GameLayout, field_units};
use crate::ui::theme::Theme;

/// Longest frame step fed to the engine, in seconds.
const MAX_FRAME_DT: f64 = 0.25;

pub const SETTINGS_FIELDS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Playing,
    GameOver,
    HighScores,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: Option<JsonStore>,
    pub high_scores: HighScoresData,
    pub session: Option<GameSession>,
    pub last_result: Option<GameResult>,
    pub last_submit: SubmitOutcome,
    pub settings_selected: usize,
    pub confirm_reset: bool,
    pub should_quit: bool,
    vocabulary: Vocabulary,
    field: Rect,
    last_tick: Instant,
}

/// Custom word list from the config, or the built-in one if unset or unusable.
pub fn load_vocabulary(path: Option<&str>) -> Vocabulary {
    let Some(path) = path else {
        return Vocabulary::builtin();
    };
    match Vocabulary::load_file(Path::new(path)) {
        Ok(vocab) => {
            info!("loaded {} words from {path}", vocab.len());
            vocab
        }
        Err(e) => {
            warn!("word list {path} unusable ({e}), using built-in words");
            Vocabulary::builtin()
        }
    }
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = match JsonStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("high scores will not be saved: {e}");
                None
            }
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Option<JsonStore>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let mut menu = Menu::new(theme);
        menu.select_difficulty(config.difficulty());

        let high_scores = store
            .as_ref()
            .map(|s| s.load_high_scores())
            .unwrap_or_default();
        let vocabulary = load_vocabulary(config.word_list_path.as_deref());

        Self {
            screen: AppScreen::Menu,
            menu,
            theme,
            config,
            store,
            high_scores,
            session: None,
            last_result: None,
            last_submit: SubmitOutcome::default(),
            settings_selected: 0,
            confirm_reset: false,
            should_quit: false,
            vocabulary,
            field: Rect::new(0, 0, 80, 20),
            last_tick: Instant::now(),
        }
    }

    /// Records the terminal size so the engine plays on the visible field.
    pub fn set_viewport(&mut self, area: Rect) {
        self.field = GameLayout::new(area).field_inner();
    }

    pub fn field(&self) -> Rect {
        self.field
    }

    pub fn activate_menu(&mut self) {
        match self.menu.selected_action() {
            MenuAction::Play(difficulty) => self.start_game(difficulty),
            MenuAction::HighScores => self.go_to_high_scores(),
            MenuAction::Settings => self.go_to_settings(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    pub fn start_game(&mut self, difficulty: Difficulty) {
        self.config.set_difficulty(difficulty);
        self.menu.select_difficulty(difficulty);
        let engine = WordEngine::new(self.vocabulary.clone());
        self.session = Some(GameSession::new(
            engine,
            difficulty,
            self.config.starting_lives,
        ));
        self.last_tick = Instant::now();
        self.screen = AppScreen::Playing;
    }

    pub fn retry(&mut self) {
        self.start_game(self.config.difficulty());
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        self.advance(dt);
    }

    /// Steps the running game by `dt` seconds (capped per frame).
    pub fn advance(&mut self, dt: f64) {
        if self.screen != AppScreen::Playing {
            return;
        }
        let (width, height) = field_units(self.field);
        let over = match self.session.as_mut() {
            Some(session) => {
                session.tick(dt.min(MAX_FRAME_DT), width, height);
                session.is_over()
            }
            None => false,
        };
        if over {
            self.finish_game();
        }
    }

    pub fn type_char(&mut self, ch: char) -> KeystrokeOutcome {
        match self.session.as_mut() {
            Some(session) if self.screen == AppScreen::Playing => session.type_char(ch),
            _ => KeystrokeOutcome::NoHit,
        }
    }

    pub fn backspace(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.backspace();
        }
    }

    /// Ends the current run, records the result and shows the summary.
    pub fn finish_game(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.finish();

        let result = GameResult::from_session(&session);
        self.last_submit = self.high_scores.submit(
            &result.mode,
            &self.config.player_name,
            result.score,
            Utc::now(),
        );
        if self.last_submit.mode_high {
            info!("new {} high score: {}", result.mode, result.score);
        }
        self.save_high_scores();

        self.last_result = Some(result);
        self.screen = AppScreen::GameOver;
    }

    fn save_high_scores(&self) {
        if let Some(ref store) = self.store
            && let Err(e) = store.save_high_scores(&self.high_scores)
        {
            warn!("failed to save high scores: {e}");
        }
    }

    pub fn go_to_menu(&mut self) {
        self.session = None;
        self.confirm_reset = false;
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_high_scores(&mut self) {
        self.confirm_reset = false;
        self.screen = AppScreen::HighScores;
    }

    pub fn reset_high_scores(&mut self) {
        self.high_scores.reset_all();
        self.confirm_reset = false;
        self.save_high_scores();
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn leave_settings(&mut self) {
        if let Err(e) = self.config.save() {
            warn!("failed to save config: {e}");
        }
        self.go_to_menu();
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => {
                let next = self.config.difficulty().next();
                self.config.set_difficulty(next);
                self.menu.select_difficulty(next);
            }
            1 => {
                self.config.starting_lives = (self.config.starting_lives + 1).min(9);
            }
            2 => self.cycle_theme(true),
            3 => {
                self.config.tick_ms = (self.config.tick_ms + 5).min(200);
            }
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                let prev = self.config.difficulty().prev();
                self.config.set_difficulty(prev);
                self.menu.select_difficulty(prev);
            }
            1 => {
                self.config.starting_lives = self.config.starting_lives.saturating_sub(1).max(1);
            }
            2 => self.cycle_theme(false),
            3 => {
                self.config.tick_ms = self.config.tick_ms.saturating_sub(5).max(10);
            }
            _ => {}
        }
    }

    fn cycle_theme(&mut self, forward: bool) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let next = match themes.iter().position(|t| *t == self.config.theme) {
            Some(idx) if forward => (idx + 1) % themes.len(),
            Some(idx) => (idx + themes.len() - 1) % themes.len(),
            None => 0,
        };
        self.config.theme = themes[next].clone();
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::target::Position;
    use tempfile::TempDir;

    fn make_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            player_name: "tester".to_string(),
            ..Config::default()
        };
        (dir, App::with_store(config, Some(store)))
    }

    #[test]
    fn test_start_game_from_menu() {
        let (_dir, mut app) = make_app();
        app.menu.select_difficulty(Difficulty::Hard);
        app.activate_menu();
        assert_eq!(app.screen, AppScreen::Playing);
        assert_eq!(app.session.as_ref().unwrap().difficulty(), Difficulty::Hard);
        assert_eq!(app.config.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_advance_spawns_on_visible_field() {
        let (_dir, mut app) = make_app();
        app.set_viewport(Rect::new(0, 0, 100, 30));
        app.start_game(Difficulty::Classic);
        app.advance(0.016);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.engine.len(), 1);
        let x = session.engine.targets().next().unwrap().position.x;
        assert!(x <= field_units(app.field()).0 - 100.0);
    }

    #[test]
    fn test_finish_records_and_persists_high_score() {
        let (dir, mut app) = make_app();
        app.start_game(Difficulty::Insane);
        {
            let session = app.session.as_mut().unwrap();
            session
                .engine
                .spawn_at("comet", Position { x: 20.0, y: 0.0 });
        }
        for ch in "comet".chars() {
            app.type_char(ch);
        }
        app.finish_game();

        assert_eq!(app.screen, AppScreen::GameOver);
        assert!(app.session.is_none());
        assert!(app.last_submit.mode_high);
        assert_eq!(app.last_result.as_ref().unwrap().score, 20);

        let reloaded = JsonStore::with_base_dir(dir.path().to_path_buf())
            .unwrap()
            .load_high_scores();
        let best = reloaded.get("insane").unwrap();
        assert_eq!(best.score, 20);
        assert_eq!(best.name, "tester");
    }

    #[test]
    fn test_losing_all_lives_ends_game() {
        let (_dir, mut app) = make_app();
        app.config.starting_lives = 1;
        app.start_game(Difficulty::Classic);
        let (_, height) = field_units(app.field());
        app.session
            .as_mut()
            .unwrap()
            .engine
            .spawn_at("zulu", Position { x: 20.0, y: height });
        app.advance(0.016);
        assert_eq!(app.screen, AppScreen::GameOver);
        assert_eq!(app.last_result.as_ref().unwrap().words_missed, 1);
    }

    #[test]
    fn test_typing_outside_game_is_ignored() {
        let (_dir, mut app) = make_app();
        assert_eq!(app.type_char('a'), KeystrokeOutcome::NoHit);
        app.backspace();
        app.advance(1.0);
        assert_eq!(app.screen, AppScreen::Menu);
    }

    #[test]
    fn test_settings_cycle_clamps() {
        let (_dir, mut app) = make_app();
        app.settings_selected = 1;
        for _ in 0..20 {
            app.settings_cycle_forward();
        }
        assert_eq!(app.config.starting_lives, 9);
        for _ in 0..20 {
            app.settings_cycle_backward();
        }
        assert_eq!(app.config.starting_lives, 1);

        app.settings_selected = 0;
        app.settings_cycle_backward();
        assert_eq!(app.config.difficulty(), Difficulty::Insane);
    }

    #[test]
    fn test_reset_high_scores() {
        let (_dir, mut app) = make_app();
        app.high_scores.submit("classic", "x", 50, Utc::now());
        app.reset_high_scores();
        assert!(!app.high_scores.global.is_set());
    }
}
