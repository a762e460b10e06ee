//! Outbound notifications from the controller to the presentation layer.

use super::state::{ClueId, Elapsed, ItemId};

/// Toast durations (ms).
pub const GREETING_MS: u32 = 4000;
pub const NOTHING_HERE_MS: u32 = 2000;
pub const NEED_KEY_MS: u32 = 2500;
pub const NEED_CLUES_MS: u32 = 2000;
pub const BAD_FORMAT_MS: u32 = 2000;
pub const WRONG_CODE_MS: u32 = 3000;
pub const DOOR_LOCKED_MS: u32 = 3000;

pub const UNLOCK_NARRATIVE: &str =
    "中から脱出用の鍵が出てきた！\n\n祖父の誕生日「11月17日」が暗号だったのか...\nドアを開けて脱出しよう！";

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    /// Hide the title screen.
    SessionStarted,
    /// Show a clue's content; `review` when it was already discovered.
    ShowClue {
        clue: ClueId,
        text: &'static str,
        glyph: Option<ItemId>,
        review: bool,
    },
    /// Mark an object as examined.
    ObjectFound(ClueId),
    Message {
        text: String,
        duration_ms: u32,
    },
    Inventory(Vec<ItemId>),
    HintCounter {
        found: usize,
        total: usize,
    },
    OpenCodeSurface,
    CloseCodeSurface,
    CodeFeedback {
        correct: bool,
    },
    /// Wipe the entered digits after a wrong attempt.
    ClearCodeEntry,
    DoorUnlocked {
        narrative: &'static str,
    },
    EscapeSummary(Elapsed),
    SessionReset,
}

impl ViewEvent {
    pub fn message(text: impl Into<String>, duration_ms: u32) -> Self {
        ViewEvent::Message {
            text: text.into(),
            duration_ms,
        }
    }
}
