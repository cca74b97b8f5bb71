use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::difficulty::Difficulty;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Play(Difficulty),
    HighScores,
    Settings,
    Quit,
}

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
    pub action: MenuAction,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: "1".to_string(),
                    label: "Classic".to_string(),
                    description: "Gentle fall speed, relaxed spawns".to_string(),
                    action: MenuAction::Play(Difficulty::Classic),
                },
                MenuItem {
                    key: "2".to_string(),
                    label: "Hard".to_string(),
                    description: "Faster words, tighter spawns".to_string(),
                    action: MenuAction::Play(Difficulty::Hard),
                },
                MenuItem {
                    key: "3".to_string(),
                    label: "Insane".to_string(),
                    description: "Good luck".to_string(),
                    action: MenuAction::Play(Difficulty::Insane),
                },
                MenuItem {
                    key: "h".to_string(),
                    label: "High Scores".to_string(),
                    description: "Best run per mode".to_string(),
                    action: MenuAction::HighScores,
                },
                MenuItem {
                    key: "c".to_string(),
                    label: "Settings".to_string(),
                    description: "Configure wordfall".to_string(),
                    action: MenuAction::Settings,
                },
            ],
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        self.items
            .get(self.selected)
            .map(|item| item.action)
            .unwrap_or(MenuAction::Quit)
    }

    /// Moves the cursor onto the entry for `difficulty`.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if let Some(idx) = self
            .items
            .iter()
            .position(|item| item.action == MenuAction::Play(difficulty))
        {
            self.selected = idx;
        }
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "wordfall",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Type the words before they land",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];

        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{key}] {label}", key = item.key, label = item.label);
            let desc_text = format!("     {}", item.description);

            let lines = vec![
                Line::from(Span::styled(
                    &*label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    &*desc_text,
                    Style::default().fg(colors.text_dim()),
                )),
            ];

            let p = Paragraph::new(lines);
            if i < menu_layout.len() {
                p.render(menu_layout[i], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        menu.prev();
        assert_eq!(menu.selected_action(), MenuAction::Settings);
        menu.next();
        assert_eq!(menu.selected_action(), MenuAction::Play(Difficulty::Classic));
    }

    #[test]
    fn test_select_difficulty() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        menu.select_difficulty(Difficulty::Insane);
        assert_eq!(menu.selected_action(), MenuAction::Play(Difficulty::Insane));
    }
}
