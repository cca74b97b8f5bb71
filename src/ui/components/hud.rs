use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::game::GameSession;
use crate::store::schema::HighScoreRecord;
use crate::ui::theme::Theme;

/// Header strip shown while playing.
pub struct Hud<'a> {
    session: &'a GameSession,
    best: Option<&'a HighScoreRecord>,
    theme: &'a Theme,
}

impl<'a> Hud<'a> {
    pub fn new(
        session: &'a GameSession,
        best: Option<&'a HighScoreRecord>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            best,
            theme,
        }
    }
}

pub fn lives_text(lives: u32) -> String {
    "\u{2665}".repeat(lives as usize)
}

impl Widget for Hud<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let s = self.session;

        let label = Style::default().fg(colors.text_dim()).bg(colors.header_bg());
        let value = Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled(
                format!(" {} ", s.difficulty().label()),
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Score ", label),
            Span::styled(s.score.to_string(), value),
            Span::styled("  Level ", label),
            Span::styled(s.level().to_string(), value),
            Span::styled("  Lives ", label),
            Span::styled(
                lives_text(s.lives),
                Style::default().fg(colors.error()).bg(colors.header_bg()),
            ),
            Span::styled("  Acc ", label),
            Span::styled(format!("{:.0}%", s.accuracy()), value),
        ];
        if let Some(best) = self.best.filter(|b| b.is_set()) {
            spans.push(Span::styled("  Best ", label));
            spans.push(Span::styled(
                format!("{} ({})", best.score, best.name),
                Style::default().fg(colors.warning()).bg(colors.header_bg()),
            ));
        }

        let next = match s.next_level_in() {
            Some(points) => format!(" next level in {points} pts"),
            None => " max level".to_string(),
        };

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![Line::from(spans)];
        Paragraph::new(lines).render(inner, buf);

        let hint_width = next.chars().count() as u16;
        if inner.width > hint_width + 60 {
            let x = inner.right() - hint_width - 1;
            buf.set_string(x, inner.y, &next, label);
        }
    }
}
