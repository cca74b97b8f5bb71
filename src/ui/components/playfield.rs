use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::session::game::GameSession;
use crate::ui::layout::to_cell;
use crate::ui::theme::Theme;

/// Falling words, the locked word highlighted, plus kill markers.
pub struct Playfield<'a> {
    session: &'a GameSession,
    theme: &'a Theme,
}

impl<'a> Playfield<'a> {
    pub fn new(session: &'a GameSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

/// Writes `text` from `(x, y)` rightwards, stopping at the field edge.
/// Returns the column after the last written cell.
fn put_clipped(buf: &mut Buffer, field: Rect, x: u16, y: u16, text: &str, style: Style) -> u16 {
    let mut col = x;
    for ch in text.chars() {
        if col >= field.right() {
            break;
        }
        buf[(col, y)].set_char(ch).set_style(style);
        col += 1;
    }
    col
}

impl Widget for Playfield<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let field = block.inner(area);
        block.render(area, buf);

        if field.width == 0 || field.height == 0 {
            return;
        }

        for burst in &self.session.bursts {
            if let Some((x, y)) = to_cell(burst.position, field) {
                let marker: String = "*".repeat(burst.text.chars().count().max(1));
                put_clipped(
                    buf,
                    field,
                    x,
                    y,
                    &marker,
                    Style::default()
                        .fg(colors.burst())
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        let active = self.session.engine.active_id();
        for target in self.session.engine.targets() {
            let Some((x, y)) = to_cell(target.position, field) else {
                continue;
            };
            let locked = active == Some(target.id);

            let typed_style = Style::default()
                .fg(colors.word_typed())
                .add_modifier(Modifier::BOLD);
            let pending_style = if locked {
                Style::default()
                    .fg(colors.word_locked_fg())
                    .bg(colors.word_locked_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.word_pending())
            };
            let typed_style = if locked {
                typed_style.bg(colors.word_locked_bg())
            } else {
                typed_style
            };

            let typed: String = target.typed().iter().collect();
            let remaining: String = target.remaining().iter().collect();
            let col = put_clipped(buf, field, x, y, &typed, typed_style);
            put_clipped(buf, field, col, y, &remaining, pending_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::difficulty::Difficulty;
    use crate::engine::target::Position;
    use crate::engine::words::WordEngine;
    use crate::generator::vocabulary::Vocabulary;

    fn row_text(buf: &Buffer, y: u16, from: u16, len: u16) -> String {
        (from..from + len).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_renders_word_at_mapped_cell() {
        let vocab = Vocabulary::from_words(["orbit"]).unwrap();
        let mut session = GameSession::new(WordEngine::new(vocab), Difficulty::Classic, 3);
        // Column 2, row 3 inside the border.
        session
            .engine
            .spawn_at("orbit", Position { x: 20.0, y: 60.0 });
        session.type_char('o');

        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        let theme = Theme::default();
        Playfield::new(&session, &theme).render(area, &mut buf);

        assert_eq!(row_text(&buf, 4, 3, 5), "orbit");
    }

    #[test]
    fn test_long_word_is_clipped_at_border() {
        let vocab = Vocabulary::from_words(["gravitationalwaves"]).unwrap();
        let mut session = GameSession::new(WordEngine::new(vocab), Difficulty::Classic, 3);
        session
            .engine
            .spawn_at("gravitationalwaves", Position { x: 50.0, y: 0.0 });

        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        let theme = Theme::default();
        Playfield::new(&session, &theme).render(area, &mut buf);

        assert_eq!(row_text(&buf, 1, 6, 5), "gravi");
        // Right border survives.
        assert_ne!(buf[(11, 1)].symbol(), "t");
    }
}
