//! Presentation state for the study: which screen, which modal, the code
//! panel, the toast and the inventory slots.
//!
//! Built only from [`ViewEvent`]s plus local UI input (digit entry, closing
//! modals); it never reaches into the controller.

use crate::time::ms_to_ticks;

use super::events::ViewEvent;
use super::state::{ClueId, Elapsed, ItemId, CLUE_COUNT};

pub const CODE_LEN: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Title,
    Room,
    Ending(Elapsed),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    Clue {
        title: &'static str,
        text: &'static str,
        glyph: &'static str,
    },
    /// Safe opened; the action button escapes.
    Unlocked { text: &'static str },
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Modal::Clue { title, .. } => *title,
            Modal::Unlocked { .. } => "金庫が開いた！",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Modal::Clue { text, .. } | Modal::Unlocked { text } => *text,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Modal::Clue { glyph, .. } => *glyph,
            Modal::Unlocked { .. } => "🗝️",
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self {
            Modal::Clue { .. } => "わかった",
            Modal::Unlocked { .. } => "脱出する！",
        }
    }
}

/// Four digit slots with a cursor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CodeEntry {
    digits: [Option<char>; CODE_LEN],
    cursor: usize,
}

impl CodeEntry {
    /// Accept a decimal digit at the cursor and move right. Anything else is
    /// dropped here and never reaches the controller.
    pub fn push_digit(&mut self, ch: char) -> bool {
        if !ch.is_ascii_digit() {
            return false;
        }
        self.digits[self.cursor] = Some(ch);
        if self.cursor < CODE_LEN - 1 {
            self.cursor += 1;
        }
        true
    }

    /// Clear the current slot, or step back and clear the previous one when
    /// the current slot is already empty.
    pub fn backspace(&mut self) {
        if self.digits[self.cursor].is_none() && self.cursor > 0 {
            self.cursor -= 1;
        }
        self.digits[self.cursor] = None;
    }

    pub fn focus(&mut self, slot: usize) {
        if slot < CODE_LEN {
            self.cursor = slot;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slot(&self, i: usize) -> Option<char> {
        self.digits.get(i).copied().flatten()
    }

    /// Filled digits joined in slot order; gaps are skipped, so a partial
    /// entry comes out shorter than four characters.
    pub fn code(&self) -> String {
        self.digits.iter().flatten().collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SafePanel {
    pub entry: CodeEntry,
    /// `Some(true)` correct / `Some(false)` wrong, shown until cleared.
    pub feedback: Option<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub text: String,
    pub ticks_left: u32,
}

pub struct RoomView {
    pub screen: Screen,
    pub modal: Option<Modal>,
    pub safe: Option<SafePanel>,
    pub toast: Option<Toast>,
    pub slots: Vec<Option<ItemId>>,
    pub hints_found: usize,
    pub hints_total: usize,
    pub found: [bool; CLUE_COUNT],
    pub door_open: bool,
}

impl RoomView {
    pub fn new(slot_count: usize) -> Self {
        Self {
            screen: Screen::Title,
            modal: None,
            safe: None,
            toast: None,
            slots: vec![None; slot_count],
            hints_found: 0,
            hints_total: CLUE_COUNT,
            found: [false; CLUE_COUNT],
            door_open: false,
        }
    }

    pub fn is_found(&self, id: ClueId) -> bool {
        self.found[id.index()]
    }

    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::SessionStarted => self.screen = Screen::Room,
            ViewEvent::ShowClue {
                text, glyph, review, ..
            } => {
                self.modal = Some(Modal::Clue {
                    title: if review { "確認" } else { "発見！" },
                    text,
                    glyph: glyph.map(ItemId::glyph).unwrap_or("🔍"),
                });
            }
            ViewEvent::ObjectFound(id) => self.found[id.index()] = true,
            ViewEvent::Message { text, duration_ms } => {
                self.toast = Some(Toast {
                    text,
                    ticks_left: ms_to_ticks(duration_ms),
                });
            }
            ViewEvent::Inventory(items) => {
                for (i, slot) in self.slots.iter_mut().enumerate() {
                    *slot = items.get(i).copied();
                }
            }
            ViewEvent::HintCounter { found, total } => {
                self.hints_found = found;
                self.hints_total = total;
            }
            ViewEvent::OpenCodeSurface => self.safe = Some(SafePanel::default()),
            ViewEvent::CloseCodeSurface => self.safe = None,
            ViewEvent::CodeFeedback { correct } => {
                if let Some(panel) = &mut self.safe {
                    panel.feedback = Some(correct);
                }
            }
            ViewEvent::ClearCodeEntry => {
                if let Some(panel) = &mut self.safe {
                    panel.entry.clear();
                    panel.feedback = None;
                }
            }
            ViewEvent::DoorUnlocked { narrative } => {
                self.door_open = true;
                self.modal = Some(Modal::Unlocked { text: narrative });
            }
            ViewEvent::EscapeSummary(elapsed) => {
                self.modal = None;
                self.safe = None;
                self.screen = Screen::Ending(elapsed);
            }
            ViewEvent::SessionReset => {
                *self = RoomView::new(self.slots.len());
            }
        }
    }

    /// Count down the toast.
    pub fn tick(&mut self, delta_ticks: u32) {
        if let Some(toast) = &mut self.toast {
            toast.ticks_left = toast.ticks_left.saturating_sub(delta_ticks);
            if toast.ticks_left == 0 {
                self.toast = None;
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Closing the safe throws away whatever was typed.
    pub fn close_safe(&mut self) {
        self.safe = None;
    }

    pub fn close_all(&mut self) {
        self.close_modal();
        self.close_safe();
    }
}
