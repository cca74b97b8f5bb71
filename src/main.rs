mod app;
mod config;
mod engine;
mod event;
mod generator;
mod logging;
mod session;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen, SETTINGS_FIELDS};
use config::Config;
use engine::difficulty::Difficulty;
use event::{AppEvent, EventHandler};
use ui::components::game_over::GameOverDashboard;
use ui::components::high_scores::HighScoreTable;
use ui::components::hud::Hud;
use ui::components::playfield::Playfield;
use ui::layout::GameLayout;

#[derive(Parser)]
#[command(name = "wordfall", version, about = "Shoot the falling words before they land")]
struct Cli {
    #[arg(short, long, help = "Difficulty (classic, hard, insane)")]
    difficulty: Option<String>,

    #[arg(short, long, help = "Player name recorded with high scores")]
    name: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Word list file (JSON array or one word per line)")]
    words: Option<PathBuf>,

    #[arg(long, help = "Starting lives (1-9)")]
    lives: Option<u32>,

    #[arg(long, help = "Write a debug log to the data directory")]
    log: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log, &logging::default_log_path())?;

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("config unreadable, using defaults: {e}");
        Config::default()
    });
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(name) = cli.name {
        config.player_name = name;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(words) = cli.words {
        config.word_list_path = Some(words.to_string_lossy().to_string());
    }
    if let Some(lives) = cli.lives {
        config.starting_lives = lives;
    }
    config.validate();

    let tick_rate = Duration::from_millis(config.tick_ms);
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        app.set_viewport(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat would fire extra letters
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Playing => handle_game_key(app, key),
        AppScreen::GameOver => handle_game_over_key(app, key),
        AppScreen::HighScores => handle_high_scores_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.start_game(Difficulty::Classic),
        KeyCode::Char('2') => app.start_game(Difficulty::Hard),
        KeyCode::Char('3') => app.start_game(Difficulty::Insane),
        KeyCode::Char('h') => app.go_to_high_scores(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.activate_menu(),
        _ => {}
    }
}

fn handle_game_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.finish_game(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch) => {
            app.type_char(ch.to_ascii_lowercase());
        }
        _ => {}
    }
}

fn handle_game_over_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.retry(),
        KeyCode::Char('h') => app.go_to_high_scores(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_high_scores_key(app: &mut App, key: KeyEvent) {
    // Confirmation dialog takes priority
    if app.confirm_reset {
        match key.code {
            KeyCode::Char('y') => app.reset_high_scores(),
            KeyCode::Char('n') | KeyCode::Esc => app.confirm_reset = false,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('x') | KeyCode::Delete => app.confirm_reset = true,
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.leave_settings(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected + 1 < SETTINGS_FIELDS {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Playing => render_game(frame, app),
        AppScreen::GameOver => render_game_over(frame, app),
        AppScreen::HighScores => render_high_scores(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let best = &app.high_scores.global;
    let header_info = if best.is_set() {
        format!(" Best {} by {} ({})", best.score, best.name, best.mode)
    } else {
        " No high score yet".to_string()
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " wordfall ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            &*header_info,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " [1-3] Play  [h] High scores  [c] Settings  [q] Quit ",
        Style::default().fg(colors.text_dim()),
    )]));
    frame.render_widget(footer, layout[2]);
}

fn render_game(frame: &mut ratatui::Frame, app: &App) {
    let Some(ref session) = app.session else {
        return;
    };
    let colors = &app.theme.colors;
    let layout = GameLayout::new(frame.area());

    let best = app.high_scores.get(session.difficulty().as_str());
    frame.render_widget(Hud::new(session, best, app.theme), layout.header);
    frame.render_widget(Playfield::new(session, app.theme), layout.field);

    let footer = Paragraph::new(Line::from(Span::styled(
        " Type to shoot  [Backspace] Undo letter  [Esc] End game ",
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_game_over(frame: &mut ratatui::Frame, app: &App) {
    if let Some(ref result) = app.last_result {
        let centered = ui::layout::centered_rect(60, 60, frame.area());
        let dashboard = GameOverDashboard::new(result, app.last_submit, app.theme);
        frame.render_widget(dashboard, centered);
    }
}

fn render_high_scores(frame: &mut ratatui::Frame, app: &App) {
    let centered = ui::layout::centered_rect(70, 60, frame.area());
    let table = HighScoreTable::new(&app.high_scores, app.confirm_reset, app.theme);
    frame.render_widget(table, centered);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        ("Difficulty".to_string(), app.config.difficulty().label().to_string()),
        ("Starting Lives".to_string(), format!("{}", app.config.starting_lives)),
        ("Theme".to_string(), app.config.theme.clone()),
        ("Tick (ms, next launch)".to_string(), format!("{}", app.config.tick_ms)),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.text_dim()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_text = format!("{indicator}{label}:");
        let value_text = format!("  < {value} >");

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected { Modifier::BOLD } else { Modifier::empty() });

        let value_style = Style::default().fg(if is_selected {
            colors.warning()
        } else {
            colors.text_dim()
        });

        let lines = vec![
            Line::from(Span::styled(label_text, label_style)),
            Line::from(Span::styled(value_text, value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!("  Player: {}   [ESC] Save & back", app.config.player_name),
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
