//! Reusable clickable UI components.
//!
//! Each component renders itself and registers its own click targets, so
//! the hit regions always match what is on screen.
//!
//! - [`ClickableList`]: vertical list with per-line click targets.
//! - [`ButtonRow`]: a centered row of buttons (keypad, code slots).
//! - [`centered_rect`]: popup placement.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::Style;
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── ClickableList ──────────────────────────────────────────────

/// Pairs rendered [`Line`]s with click actions.
///
/// Lines are annotated as clickable when added, and
/// [`register_targets`](ClickableList::register_targets) maps them to rows
/// after layout. Lines are assumed not to wrap.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("部屋の中を見回す"));
/// cl.push_clickable(Line::from(" [1] ランプ"), OBJECT_BASE);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every clickable line.
    ///
    /// `top_offset` / `bottom_offset` are the rows taken by borders or
    /// padding above and below the content. Lines past the bottom are clipped.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}

// ── ButtonRow ──────────────────────────────────────────────────

/// A single row of labelled buttons, centered in its area.
///
/// Widths come from the rendered text (CJK characters count double), and
/// each button gets a click target exactly over its label.
pub struct ButtonRow {
    buttons: Vec<(String, Style, u16)>,
    gap: u16,
}

impl ButtonRow {
    pub fn new(gap: u16) -> Self {
        Self {
            buttons: Vec::new(),
            gap,
        }
    }

    pub fn button(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.buttons.push((label.into(), style, action_id));
        self
    }

    fn label_widths(&self) -> Vec<u16> {
        self.buttons
            .iter()
            .map(|(label, _, _)| Line::from(label.as_str()).width() as u16)
            .collect()
    }

    /// Total display width including gaps.
    pub fn width(&self) -> u16 {
        let labels: u16 = self.label_widths().iter().sum();
        let gaps = self.gap * self.buttons.len().saturating_sub(1) as u16;
        labels + gaps
    }

    /// Hit regions for each button on the first row of `area`.
    pub fn layout(&self, area: Rect) -> Vec<(Rect, u16)> {
        let mut x = area.x + area.width.saturating_sub(self.width()) / 2;
        let right = area.x + area.width;
        let mut out = Vec::with_capacity(self.buttons.len());
        for ((_, _, action_id), w) in self.buttons.iter().zip(self.label_widths()) {
            if x >= right {
                break;
            }
            let w = w.min(right - x);
            out.push((Rect::new(x, area.y, w, 1), *action_id));
            x += w + self.gap;
        }
        out
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        if area.height == 0 || self.buttons.is_empty() {
            return;
        }
        let targets = self.layout(area);
        let indent = area.width.saturating_sub(self.width()) / 2;

        let mut spans: Vec<Span> = vec![Span::raw(" ".repeat(indent as usize))];
        let gap = " ".repeat(self.gap as usize);
        for (i, (label, style, _)) in self.buttons.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(gap.clone()));
            }
            spans.push(Span::styled(label, style));
        }

        let row = Rect::new(area.x, area.y, area.width, 1);
        f.render_widget(Paragraph::new(Line::from(spans)), row);

        for (rect, action_id) in targets {
            cs.add_click_target(rect, action_id);
        }
    }
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
