//! Input handling: normalized events, click targets and pixel → cell
//! conversion.

use ratzilla::ratatui::layout::Rect;

/// Input events, normalized from keyboard, mouse and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key.
    Key(char),
    Enter,
    Backspace,
    Escape,
    /// A click/tap on a registered target, identified by a semantic action ID
    /// (see `games::study::actions`).
    Click(u16),
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared state between the render loop and click handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width target on `row`, ignored if the row lies outside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.targets.push(ClickTarget {
                rect: Rect::new(area.x, row, area.width, 1),
                action_id,
            });
        }
    }

    /// Hit-test a cell. Later registrations win where targets overlap, so a
    /// modal drawn after the room takes the click.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

/// Determine whether a screen width (in columns) should use narrow layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y coordinate (relative to the grid container's top edge)
/// to a terminal row index. `None` if outside the grid or inputs are invalid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }

    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;

    if row >= terminal_rows {
        return None;
    }

    Some(row)
}

/// Convert a pixel X coordinate to a terminal column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols {
        None
    } else {
        Some(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hit_test ───────────────────────────────────────────────────

    #[test]
    fn hit_test_object_rows() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 40, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 40, 1), 2);

        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
        assert_eq!(cs.hit_test(40, 10), None);
    }

    #[test]
    fn modal_registered_later_wins() {
        let mut cs = ClickState::new();
        // Room list underneath
        cs.add_click_target(Rect::new(0, 5, 80, 1), 10);
        // Modal button on top
        cs.add_click_target(Rect::new(20, 5, 20, 1), 99);

        assert_eq!(cs.hit_test(25, 5), Some(99));
        assert_eq!(cs.hit_test(5, 5), Some(10));
    }

    #[test]
    fn keypad_cells_side_by_side() {
        let mut cs = ClickState::new();
        for d in 0..5u16 {
            cs.add_click_target(Rect::new(d * 4, 20, 4, 1), 200 + d);
        }
        assert_eq!(cs.hit_test(0, 20), Some(200));
        assert_eq!(cs.hit_test(3, 20), Some(200));
        assert_eq!(cs.hit_test(4, 20), Some(201));
        assert_eq!(cs.hit_test(19, 20), Some(204));
        assert_eq!(cs.hit_test(20, 20), None);
    }

    #[test]
    fn add_row_target_outside_area_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 15, 2);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 12, 3);
        assert_eq!(cs.hit_test(6, 12), Some(3));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn clear_targets_resets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(37));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    // ── pixel conversion ───────────────────────────────────────────

    #[test]
    fn pixel_to_row_basic() {
        // 30 rows, 450px → 15px per row
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
    }

    #[test]
    fn pixel_to_row_invalid_inputs() {
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
    }

    #[test]
    fn pixel_to_col_basic() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
        assert_eq!(pixel_x_to_col(-1.0, 800.0, 80), None);
    }

    #[test]
    fn tap_on_keypad_pipeline() {
        // 80x30 terminal at 10px x 15px per cell
        let mut cs = ClickState::new();
        cs.terminal_cols = 80;
        cs.terminal_rows = 30;
        cs.add_click_target(Rect::new(30, 18, 4, 1), 207);

        let col = pixel_x_to_col(31.0 * 10.0 + 5.0, 800.0, cs.terminal_cols).unwrap();
        let row = pixel_y_to_row(18.0 * 15.0 + 7.0, 450.0, cs.terminal_rows).unwrap();
        assert_eq!((col, row), (31, 18));
        assert_eq!(cs.hit_test(col, row), Some(207));
    }
}
