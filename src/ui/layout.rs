use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::engine::target::Position;
use crate::engine::words::CHAR_WIDTH;

/// Engine units per terminal column, one character wide.
pub const CELL_WIDTH: f64 = CHAR_WIDTH;
/// Engine units per terminal row.
pub const CELL_HEIGHT: f64 = 20.0;

pub struct GameLayout {
    pub header: Rect,
    pub field: Rect,
    pub footer: Rect,
}

impl GameLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            field: vertical[1],
            footer: vertical[2],
        }
    }

    /// The drawable part of the playfield, inside its border.
    pub fn field_inner(&self) -> Rect {
        inner(self.field)
    }
}

fn inner(rect: Rect) -> Rect {
    Rect::new(
        rect.x.saturating_add(1),
        rect.y.saturating_add(1),
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    )
}

/// Size of a playfield in engine units.
pub fn field_units(field: Rect) -> (f64, f64) {
    (
        field.width as f64 * CELL_WIDTH,
        field.height as f64 * CELL_HEIGHT,
    )
}

/// Maps an engine position to an absolute cell inside `field`. Positions
/// above the top edge or outside the field map to `None`.
pub fn to_cell(position: Position, field: Rect) -> Option<(u16, u16)> {
    if position.x < 0.0 || position.y < 0.0 {
        return None;
    }
    let col = (position.x / CELL_WIDTH).floor() as u32;
    let row = (position.y / CELL_HEIGHT).floor() as u32;
    if col >= field.width as u32 || row >= field.height as u32 {
        return None;
    }
    Some((field.x + col as u16, field.y + row as u16))
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 48;
    const MIN_POPUP_HEIGHT: u16 = 14;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_layout_splits_vertically() {
        let layout = GameLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.field.height, 20);
        assert_eq!(layout.field_inner(), Rect::new(1, 4, 78, 18));
    }

    #[test]
    fn test_field_units() {
        assert_eq!(field_units(Rect::new(5, 5, 80, 30)), (800.0, 600.0));
    }

    #[test]
    fn test_to_cell_offsets_and_clips() {
        let field = Rect::new(1, 4, 20, 10);
        assert_eq!(to_cell(Position { x: 16.0, y: 0.0 }, field), Some((2, 4)));
        assert_eq!(to_cell(Position { x: 16.0, y: 45.0 }, field), Some((2, 6)));
        assert_eq!(to_cell(Position { x: 16.0, y: -20.0 }, field), None);
        assert_eq!(to_cell(Position { x: 250.0, y: 0.0 }, field), None);
        assert_eq!(to_cell(Position { x: 0.0, y: 200.0 }, field), None);
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect(50, 50, area), area);
    }
}
