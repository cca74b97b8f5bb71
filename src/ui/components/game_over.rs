use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::result::GameResult;
use crate::store::schema::SubmitOutcome;
use crate::ui::theme::Theme;

pub struct GameOverDashboard<'a> {
    pub result: &'a GameResult,
    pub submitted: SubmitOutcome,
    pub theme: &'a Theme,
}

impl<'a> GameOverDashboard<'a> {
    pub fn new(result: &'a GameResult, submitted: SubmitOutcome, theme: &'a Theme) -> Self {
        Self {
            result,
            submitted,
            theme,
        }
    }
}

impl Widget for GameOverDashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Game Over ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let banner = if self.submitted.global_high {
            Span::styled(
                "New overall high score!",
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            )
        } else if self.submitted.mode_high {
            Span::styled(
                format!("New {} high score!", self.result.mode),
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "Results",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )
        };
        Paragraph::new(Line::from(banner))
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let score_line = Line::from(vec![
            Span::styled("  Score:    ", Style::default().fg(colors.fg())),
            Span::styled(
                self.result.score.to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  (level {}, {})", self.result.level, self.result.mode),
                Style::default().fg(colors.text_dim()),
            ),
        ]);
        Paragraph::new(score_line).render(layout[1], buf);

        let words_line = Line::from(vec![
            Span::styled("  Words:    ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{} shot", self.result.words_killed),
                Style::default().fg(colors.success()),
            ),
            Span::styled(
                format!("  {} landed", self.result.words_missed),
                Style::default().fg(colors.error()),
            ),
        ]);
        Paragraph::new(words_line).render(layout[2], buf);

        let acc_color = if self.result.accuracy >= 95.0 {
            colors.success()
        } else if self.result.accuracy >= 85.0 {
            colors.warning()
        } else {
            colors.error()
        };
        let acc_line = Line::from(vec![
            Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.1}%", self.result.accuracy),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({} keystrokes)", self.result.keystrokes),
                Style::default().fg(colors.text_dim()),
            ),
        ]);
        Paragraph::new(acc_line).render(layout[3], buf);

        let time_line = Line::from(vec![
            Span::styled("  Time:     ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.1}s", self.result.elapsed_secs),
                Style::default().fg(colors.fg()),
            ),
            Span::styled(
                format!("  ({:.1} words/min)", self.result.words_per_minute()),
                Style::default().fg(colors.text_dim()),
            ),
        ]);
        Paragraph::new(time_line).render(layout[4], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [r/Enter] Play again  ", Style::default().fg(colors.accent())),
            Span::styled("[h] High scores  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Menu", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[6], buf);
    }
}
