//! Semantic action IDs for the study's click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Screens ─────────────────────────────────────────────────────
pub const START: u16 = 0;
pub const RESTART: u16 = 1;

// ── Overlays ────────────────────────────────────────────────────
/// Primary button of the open modal ("わかった" / "脱出する！").
pub const MODAL_ACTION: u16 = 2;
/// Close button of the open overlay.
pub const CLOSE: u16 = 3;
/// Anywhere outside the overlay window.
pub const BACKDROP: u16 = 4;
/// Inside the overlay window but not on a button; swallowed.
pub const INERT: u16 = 5;

// ── Room objects (base + ObjectId index) ────────────────────────
pub const OBJECT_BASE: u16 = 10;

// ── Safe code panel ─────────────────────────────────────────────
pub const SUBMIT_CODE: u16 = 30;
pub const BACKSPACE: u16 = 31;
/// base + slot index 0..3
pub const CODE_SLOT_BASE: u16 = 40;
/// base + digit 0..9
pub const DIGIT_BASE: u16 = 50;
