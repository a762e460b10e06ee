//! Study rendering: title, room, overlays and the ending screen.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{centered_rect, ButtonRow, ClickableList};

use super::actions::*;
use super::state::{Elapsed, ObjectId};
use super::view::{Modal, RoomView, SafePanel, Screen, CODE_LEN};

const MODAL_WIDTH: u16 = 46;
const SAFE_WIDTH: u16 = 40;

pub fn render(view: &RoomView, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    match &view.screen {
        Screen::Title => render_title(f, area, click_state),
        Screen::Room => {
            render_room(view, f, area, click_state);
            if let Some(panel) = &view.safe {
                render_backdrop(area, click_state);
                render_safe(panel, f, area, click_state);
            }
            // The modal sits above the safe panel when both are up.
            if let Some(modal) = &view.modal {
                render_backdrop(area, click_state);
                render_modal(modal, f, area, click_state);
            }
        }
        Screen::Ending(elapsed) => render_ending(view, *elapsed, f, area, click_state),
    }
}

// ── Title ──────────────────────────────────────────────────────

fn render_title(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "祖父の書斎",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    for text in [
        "祖父が遺した書斎に閉じ込められてしまった。",
        "部屋に隠された手がかりを集め、",
        "金庫の暗号を解いて脱出しよう。",
    ] {
        cl.push(Line::from(Span::styled(text, Style::default().fg(Color::White))));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [Enter] ゲームスタート ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        START,
    );

    let height = (cl.len() as u16 + 3).min(area.height);
    let panel = centered_rect(area.width.min(56), height, area);
    cl.register_targets(panel, &mut click_state.borrow_mut(), 1, 1);

    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" 脱出ゲーム "),
        );
    f.render_widget(widget, panel);
}

// ── Room ───────────────────────────────────────────────────────

fn render_room(view: &RoomView, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(view, f, chunks[0]);

    if is_narrow_layout(area.width) {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(ObjectId::ALL.len() as u16 + 2),
                Constraint::Min(4),
            ])
            .split(chunks[1]);
        render_objects(view, f, body[0], click_state);
        render_inventory(view, f, body[1]);
    } else {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        render_objects(view, f, body[0], click_state);
        render_inventory(view, f, body[1]);
    }

    render_message(view, f, chunks[2]);
}

fn render_header(view: &RoomView, f: &mut Frame, area: Rect) {
    let counter_color = if view.hints_found == view.hints_total {
        Color::Green
    } else {
        Color::Yellow
    };
    let line = Line::from(vec![
        Span::styled(
            "祖父の書斎",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("ヒント ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", view.hints_found, view.hints_total),
            Style::default()
                .fg(counter_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let widget = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
}

fn object_line(view: &RoomView, object: ObjectId) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let (marker, marker_style) = match object {
        ObjectId::Safe if view.door_open => ("開いている", Style::default().fg(Color::Green)),
        ObjectId::Safe => ("🔒", Style::default()),
        ObjectId::Door if view.door_open => ("🔓", Style::default()),
        ObjectId::Door => ("🔒", Style::default()),
        other => match other.clue() {
            Some(id) if view.is_found(id) => ("✓", Style::default().fg(Color::Green)),
            _ => ("", Style::default()),
        },
    };

    let found = object.clue().map(|id| view.is_found(id)).unwrap_or(false);
    let label_style = if found {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(
            format!(" [{}] ", object.hotkey().to_ascii_uppercase()),
            key_style,
        ),
        Span::styled(object.label(), label_style),
        Span::raw(" "),
        Span::styled(marker, marker_style),
    ])
}

fn render_objects(view: &RoomView, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    for object in ObjectId::ALL {
        cl.push_clickable(object_line(view, object), OBJECT_BASE + object.index() as u16);
    }
    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1);

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" ▶ 調べる（タップで選択） "),
    );
    f.render_widget(widget, area);
}

fn render_inventory(view: &RoomView, f: &mut Frame, area: Rect) {
    let slot_spans: Vec<Span> = view
        .slots
        .iter()
        .flat_map(|slot| {
            let cell = match slot {
                Some(item) => Span::styled(
                    format!(" {} ", item.glyph()),
                    Style::default().bg(Color::DarkGray),
                ),
                None => Span::styled("    ", Style::default().bg(Color::Black)),
            };
            [cell, Span::raw(" ")]
        })
        .collect();

    let mut lines = vec![Line::from(slot_spans), Line::from("")];
    for item in view.slots.iter().flatten() {
        lines.push(Line::from(Span::styled(
            format!(" {} {}", item.glyph(), item.name()),
            Style::default().fg(Color::Magenta),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(" 持ち物 "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_message(view: &RoomView, f: &mut Frame, area: Rect) {
    let line = match &view.toast {
        Some(toast) => Line::from(Span::styled(
            toast.text.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "数字キー・S・D で調べる / クリックでも操作できます",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

// ── Overlays ───────────────────────────────────────────────────

/// Clicks that land outside the overlay window close it.
fn render_backdrop(area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    click_state.borrow_mut().add_click_target(area, BACKDROP);
}

/// Clear the window, draw its frame with a close button, swallow clicks
/// on the body. Returns the inner area.
fn open_window(
    f: &mut Frame,
    popup: Rect,
    title: &str,
    color: Color,
    click_state: &Rc<RefCell<ClickState>>,
) -> Rect {
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut cs = click_state.borrow_mut();
    cs.add_click_target(popup, INERT);
    if popup.width >= 6 {
        let close = Rect::new(popup.x + popup.width - 4, popup.y, 3, 1);
        f.render_widget(
            Paragraph::new(Span::styled(" × ", Style::default().fg(Color::Red))),
            close,
        );
        cs.add_click_target(close, CLOSE);
    }
    inner
}

fn render_modal(modal: &Modal, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let width = MODAL_WIDTH.min(area.width.saturating_sub(2)).max(10);
    let body = Paragraph::new(modal.text())
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });
    let text_rows = body.line_count(width.saturating_sub(4)) as u16;
    // borders + glyph + gap + text + gap + button
    let height = text_rows + 6;
    let popup = centered_rect(width, height, area);

    let color = match modal {
        Modal::Clue { .. } => Color::Cyan,
        Modal::Unlocked { .. } => Color::Yellow,
    };
    let inner = open_window(f, popup, modal.title(), color, click_state);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(modal.glyph()).alignment(Alignment::Center),
        rows[0],
    );
    let text_area = Rect::new(
        rows[2].x + 1,
        rows[2].y,
        rows[2].width.saturating_sub(2),
        rows[2].height,
    );
    f.render_widget(body, text_area);

    ButtonRow::new(1)
        .button(
            format!(" {} ", modal.action_label()),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
            MODAL_ACTION,
        )
        .render(f, rows[4], &mut click_state.borrow_mut());
}

fn slot_style(panel: &SafePanel, slot: usize) -> Style {
    match panel.feedback {
        Some(true) => Style::default().fg(Color::Black).bg(Color::Green),
        Some(false) => Style::default().fg(Color::White).bg(Color::Red),
        None if slot == panel.entry.cursor() => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::White).bg(Color::DarkGray),
    }
}

fn render_safe(panel: &SafePanel, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let popup = centered_rect(SAFE_WIDTH.min(area.width), 13, area);
    let inner = open_window(f, popup, "金庫", Color::Yellow, click_state);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // prompt
            Constraint::Length(1),
            Constraint::Length(1), // slots
            Constraint::Length(1), // feedback
            Constraint::Length(1),
            Constraint::Length(1), // keypad 1-5
            Constraint::Length(1), // keypad 6-0
            Constraint::Length(1),
            Constraint::Length(1), // buttons
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(
            "4桁のコードを入力",
            Style::default().fg(Color::White),
        ))
        .alignment(Alignment::Center),
        rows[0],
    );

    let mut cs = click_state.borrow_mut();

    let mut slots = ButtonRow::new(1);
    for i in 0..CODE_LEN {
        let ch = panel.entry.slot(i).unwrap_or('_');
        slots = slots.button(
            format!(" {} ", ch),
            slot_style(panel, i),
            CODE_SLOT_BASE + i as u16,
        );
    }
    slots.render(f, rows[2], &mut cs);

    let feedback = match panel.feedback {
        Some(true) => Some(("✓ カチッ…開いた！", Color::Green)),
        Some(false) => Some(("✗ 違うようだ…", Color::Red)),
        None => None,
    };
    if let Some((text, color)) = feedback {
        f.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(color)))
                .alignment(Alignment::Center),
            rows[3],
        );
    }

    let key_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    for (row, digits) in [(rows[5], [1u16, 2, 3, 4, 5]), (rows[6], [6, 7, 8, 9, 0])] {
        let mut keypad = ButtonRow::new(1);
        for d in digits {
            keypad = keypad.button(format!(" {} ", d), key_style, DIGIT_BASE + d);
        }
        keypad.render(f, row, &mut cs);
    }

    ButtonRow::new(2)
        .button(
            "[Enter] 解錠",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            SUBMIT_CODE,
        )
        .button("[BS] 消す", Style::default().fg(Color::White), BACKSPACE)
        .button("[Esc] 閉じる", Style::default().fg(Color::DarkGray), CLOSE)
        .render(f, rows[8], &mut cs);
}

// ── Ending ─────────────────────────────────────────────────────

fn render_ending(
    view: &RoomView,
    elapsed: Elapsed,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let time_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "★ 脱出成功！ ★",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from("祖父の書斎から無事に脱出した！"));
    cl.push(Line::from(""));
    cl.push(Line::from(vec![
        Span::styled("クリアタイム  ", Style::default().fg(Color::DarkGray)),
        Span::styled(elapsed.minutes_text(), time_style),
        Span::raw("分"),
        Span::styled(elapsed.seconds_text(), time_style),
        Span::raw("秒"),
    ]));
    cl.push(Line::from(vec![
        Span::styled("手がかり      ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", view.hints_found, view.hints_total),
            Style::default().fg(Color::White),
        ),
    ]));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [R] もう一度プレイ ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        RESTART,
    );

    let height = (cl.len() as u16 + 3).min(area.height);
    let panel = centered_rect(area.width.min(48), height, area);
    cl.register_targets(panel, &mut click_state.borrow_mut(), 1, 1);

    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(widget, panel);
}
