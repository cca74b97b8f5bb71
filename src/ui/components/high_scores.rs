use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::schema::{HighScoreRecord, HighScoresData};
use crate::ui::theme::Theme;

pub struct HighScoreTable<'a> {
    data: &'a HighScoresData,
    confirm_reset: bool,
    theme: &'a Theme,
}

impl<'a> HighScoreTable<'a> {
    pub fn new(data: &'a HighScoresData, confirm_reset: bool, theme: &'a Theme) -> Self {
        Self {
            data,
            confirm_reset,
            theme,
        }
    }
}

fn format_row(record: &HighScoreRecord) -> String {
    let name = if record.is_set() { record.name.as_str() } else { "-" };
    let when = record
        .timestamp
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!("{:<8} {:>8}  {:<20} {}", record.mode, record.score, name, when)
}

impl Widget for HighScoreTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" High Scores ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let header_style = Style::default()
            .fg(colors.text_dim())
            .add_modifier(Modifier::UNDERLINED);
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{:<8} {:>8}  {:<20} {}", "mode", "score", "name", "date"),
                header_style,
            )),
        ];

        for (rank, record) in self.data.leaderboard().into_iter().enumerate() {
            let style = if rank == 0 && record.is_set() {
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(Span::styled(format_row(record), style)));
        }

        lines.push(Line::from(""));
        if self.data.global.is_set() {
            lines.push(Line::from(vec![
                Span::styled("Overall best: ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!(
                        "{} by {} ({})",
                        self.data.global.score, self.data.global.name, self.data.global.mode
                    ),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                "No games recorded yet",
                Style::default().fg(colors.text_dim()),
            )));
        }

        lines.push(Line::from(""));
        if self.confirm_reset {
            lines.push(Line::from(Span::styled(
                "Erase all high scores? [y] yes  [n] no",
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "[x] Reset  [q/Esc] Back",
                Style::default().fg(colors.accent()),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_row_unset() {
        let row = format_row(&HighScoreRecord::empty("hard"));
        assert!(row.starts_with("hard"));
        assert!(row.contains(" - "));
    }

    #[test]
    fn test_format_row_with_date() {
        let record = HighScoreRecord {
            name: "ada".to_string(),
            score: 340,
            mode: "insane".to_string(),
            timestamp: Some(Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()),
        };
        let row = format_row(&record);
        assert!(row.contains("340"));
        assert!(row.contains("ada"));
        assert!(row.ends_with("2025-03-14"));
    }
}
