//! Grandfather's study: the room controller.
//!
//! Owns [`GameState`] and the [`ClueBook`], enforces the puzzle's gating
//! (key → safe → code → door) and reports everything the presentation
//! needs as [`ViewEvent`]s. No rendering, no DOM.

use crate::console;
use crate::time::{Clock, Scheduler};

use super::error::CodeError;
use super::events::*;
use super::state::{
    Clue, ClueBook, ClueId, Elapsed, GameState, ItemId, ObjectId, RoomConfig, CLUE_COUNT,
};

/// Transitions that happen a short while after the code check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    RevealUnlock,
    ClearCodeEntry,
    /// Safe reopened after the door was already unlocked.
    CloseCodePanel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Investigation {
    /// Session not running.
    Ignored,
    NothingHere,
    Discovered {
        clue: ClueId,
        /// The clue's item did not fit in the inventory.
        item_dropped: bool,
    },
    Reviewed(ClueId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SafeAccess {
    Ignored,
    NeedKey,
    NeedClues,
    Opened,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeOutcome {
    Ignored,
    Accepted,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorOutcome {
    Ignored,
    Locked,
    Escaped(Elapsed),
}

pub struct RoomController {
    state: GameState,
    clues: ClueBook,
    config: RoomConfig,
    clock: Box<dyn Clock>,
    scheduler: Scheduler<Deferred>,
    events: Vec<ViewEvent>,
}

impl RoomController {
    pub fn new(config: RoomConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            state: GameState::new(&config.safe_code),
            clues: ClueBook::new(),
            config,
            clock,
            scheduler: Scheduler::new(),
            events: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clue(&self, id: ClueId) -> &Clue {
        self.clues.get(id)
    }

    pub fn is_discovered(&self, id: ClueId) -> bool {
        self.clues.is_discovered(id)
    }

    pub fn hints_found(&self) -> usize {
        self.state.hints_found
    }

    pub fn inventory(&self) -> &[ItemId] {
        &self.state.inventory
    }

    pub fn inventory_slots(&self) -> usize {
        self.config.inventory_slots
    }

    pub fn door_unlocked(&self) -> bool {
        self.state.door_unlocked
    }

    pub fn is_running(&self) -> bool {
        self.state.started && !self.state.escaped
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: ViewEvent) {
        self.events.push(event);
    }

    fn emit_progress(&mut self) {
        self.emit(ViewEvent::Inventory(self.state.inventory.clone()));
        self.emit(ViewEvent::HintCounter {
            found: self.state.hints_found,
            total: CLUE_COUNT,
        });
    }

    // ── Session ──────────────────────────────────────────────

    /// Begin the session. Calling it again while started keeps the
    /// original start time.
    pub fn start_session(&mut self) {
        if self.state.started {
            return;
        }
        self.state.started = true;
        self.state.start_time = Some(self.clock.now_ms());
        self.emit(ViewEvent::SessionStarted);
        self.emit(ViewEvent::message(
            "祖父の書斎に閉じ込められた... 部屋を調べて脱出しよう！",
            GREETING_MS,
        ));
        self.emit_progress();
        console::log_json("session started", &self.state);
    }

    /// Mark the session escaped and report the elapsed time. Only reached
    /// through an unlocked door.
    fn finish_session(&mut self) -> Elapsed {
        if let (true, Some(elapsed)) = (self.state.escaped, self.state.elapsed) {
            return elapsed;
        }
        let now = self.clock.now_ms();
        let start = self.state.start_time.unwrap_or(now);
        let elapsed = Elapsed::from_millis(now - start);

        self.state.escaped = true;
        self.state.elapsed = Some(elapsed);
        self.emit(ViewEvent::EscapeSummary(elapsed));
        console::log(&format!("escaped in {}", elapsed));
        console::log_json("escaped", &self.state);
        elapsed
    }

    /// Back to the pre-start state. Pending deferred transitions are dropped
    /// so they cannot leak into the next session.
    pub fn restart(&mut self) {
        self.state = GameState::new(&self.config.safe_code);
        self.clues.reset();
        self.scheduler.clear();
        self.emit(ViewEvent::SessionReset);
        self.emit_progress();
        console::log("session reset");
    }

    /// Advance deferred transitions.
    pub fn tick(&mut self, delta_ticks: u32) {
        for effect in self.scheduler.advance(delta_ticks) {
            match effect {
                // The player may already have walked out through the door.
                Deferred::RevealUnlock if self.state.escaped => {}
                Deferred::RevealUnlock => {
                    self.emit(ViewEvent::CloseCodeSurface);
                    self.emit(ViewEvent::DoorUnlocked {
                        narrative: UNLOCK_NARRATIVE,
                    });
                }
                Deferred::ClearCodeEntry => self.emit(ViewEvent::ClearCodeEntry),
                Deferred::CloseCodePanel => self.emit(ViewEvent::CloseCodeSurface),
            }
        }
    }

    // ── Room interaction ─────────────────────────────────────

    /// Route a click on a room object. The safe and the door have their own
    /// actions; everything else is investigated.
    pub fn click_object(&mut self, object: ObjectId) {
        if !self.is_running() {
            return;
        }
        match object {
            ObjectId::Safe => {
                self.attempt_safe_open();
            }
            ObjectId::Door => {
                self.attempt_door();
            }
            other => {
                self.investigate(other);
            }
        }
    }

    pub fn investigate(&mut self, object: ObjectId) -> Investigation {
        if !self.is_running() {
            return Investigation::Ignored;
        }

        let Some(id) = object.clue() else {
            self.emit(ViewEvent::message("特に何もないようだ...", NOTHING_HERE_MS));
            return Investigation::NothingHere;
        };

        let clue = self.clues.get(id).clone();
        if clue.discovered {
            self.emit(ViewEvent::ShowClue {
                clue: id,
                text: clue.hint,
                glyph: clue.item,
                review: true,
            });
            return Investigation::Reviewed(id);
        }

        self.clues.get_mut(id).discovered = true;
        self.state.discovered_clues.push(id);
        self.state.hints_found += 1;
        self.emit(ViewEvent::ObjectFound(id));

        let mut item_dropped = false;
        if let Some(item) = clue.item {
            item_dropped = !self.add_to_inventory(item);
        }

        self.emit(ViewEvent::ShowClue {
            clue: id,
            text: clue.hint,
            glyph: clue.item,
            review: false,
        });
        self.emit_progress();
        console::log(&format!(
            "clue discovered: {:?} ({}/{})",
            id, self.state.hints_found, CLUE_COUNT
        ));

        Investigation::Discovered { clue: id, item_dropped }
    }

    /// Returns false when every slot is taken and the item was dropped.
    fn add_to_inventory(&mut self, item: ItemId) -> bool {
        if self.state.inventory.len() >= self.config.inventory_slots {
            console::warn(&format!(
                "inventory full ({} slots), dropping {:?}",
                self.config.inventory_slots, item
            ));
            return false;
        }
        self.state.inventory.push(item);
        true
    }

    pub fn attempt_safe_open(&mut self) -> SafeAccess {
        if !self.is_running() {
            return SafeAccess::Ignored;
        }
        if !self.state.has_item(ItemId::Key) {
            self.emit(ViewEvent::message(
                "金庫には鍵が必要だ... 机を調べてみよう",
                NEED_KEY_MS,
            ));
            return SafeAccess::NeedKey;
        }
        // Implied by the key check today; kept in case another clue ever grants a key.
        if !self.clues.is_discovered(ClueId::Desk) {
            self.emit(ViewEvent::message("まずは手がかりを探そう...", NEED_CLUES_MS));
            return SafeAccess::NeedClues;
        }
        self.emit(ViewEvent::OpenCodeSurface);
        SafeAccess::Opened
    }

    /// Check a 4-digit code against the safe.
    ///
    /// Malformed input emits the format message and returns an error without
    /// touching state. A match unlocks the door immediately; the code panel
    /// closes and the unlock narrative appears after `reveal_delay_ticks`.
    /// Matching again later only closes the panel.
    pub fn submit_code(&mut self, digits: &str) -> Result<CodeOutcome, CodeError> {
        if !self.is_running() {
            return Ok(CodeOutcome::Ignored);
        }
        if let Err(e) = validate_code(digits) {
            self.emit(ViewEvent::message(
                "4桁のコードを入力してください",
                BAD_FORMAT_MS,
            ));
            return Err(e);
        }

        if digits == self.state.safe_code {
            self.emit(ViewEvent::CodeFeedback { correct: true });
            // The unlock narrative is shown once per session.
            let effect = if self.state.door_unlocked {
                Deferred::CloseCodePanel
            } else {
                Deferred::RevealUnlock
            };
            self.state.door_unlocked = true;
            self.scheduler.schedule(self.config.reveal_delay_ticks, effect);
            console::log("safe opened, door unlocked");
            Ok(CodeOutcome::Accepted)
        } else {
            self.emit(ViewEvent::CodeFeedback { correct: false });
            self.emit(ViewEvent::message(
                wrong_code_message(&self.clues),
                WRONG_CODE_MS,
            ));
            self.scheduler
                .schedule(self.config.retry_delay_ticks, Deferred::ClearCodeEntry);
            Ok(CodeOutcome::Rejected)
        }
    }

    pub fn attempt_door(&mut self) -> DoorOutcome {
        if !self.is_running() {
            return DoorOutcome::Ignored;
        }
        if self.state.door_unlocked {
            DoorOutcome::Escaped(self.finish_session())
        } else {
            self.emit(ViewEvent::message(
                "ドアには鍵がかかっている... 金庫を開ける必要がありそうだ",
                DOOR_LOCKED_MS,
            ));
            DoorOutcome::Locked
        }
    }
}

/// Exactly four ASCII digits.
pub fn validate_code(digits: &str) -> Result<(), CodeError> {
    let len = digits.chars().count();
    if len != 4 {
        return Err(CodeError::WrongLength(len));
    }
    match digits.chars().find(|c| !c.is_ascii_digit()) {
        Some(c) => Err(CodeError::NotDigit(c)),
        None => Ok(()),
    }
}

/// Message for a wrong code, nudging toward whichever of the two code
/// clues (photo, calendar) is still missing.
pub fn wrong_code_message(clues: &ClueBook) -> String {
    let mut msg = String::from("コードが違う...");
    let painting = clues.is_discovered(ClueId::Painting);
    let calendar = clues.is_discovered(ClueId::Calendar);
    match (painting, calendar) {
        (false, false) => msg.push_str(" 部屋をもっと調べてみよう"),
        (false, true) => msg.push_str(" 額縁の写真を確認してみては？"),
        (true, false) => msg.push_str(" カレンダーを確認してみては？"),
        (true, true) => {}
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    fn make_room() -> (RoomController, ManualClock) {
        let clock = ManualClock::new(10_000.0);
        let room = RoomController::new(RoomConfig::default(), Box::new(clock.clone()));
        (room, clock)
    }

    fn started_room() -> (RoomController, ManualClock) {
        let (mut room, clock) = make_room();
        room.start_session();
        room.drain_events();
        (room, clock)
    }

    fn messages(events: &[ViewEvent]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Message { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    // ── start / restart ─────────────────────────────────────

    #[test]
    fn start_session_sets_clock_and_greets() {
        let (mut room, _clock) = make_room();
        room.start_session();
        assert!(room.state().started);
        assert_eq!(room.state().start_time, Some(10_000.0));

        let events = room.drain_events();
        assert_eq!(events[0], ViewEvent::SessionStarted);
        assert_eq!(
            events[1],
            ViewEvent::message("祖父の書斎に閉じ込められた... 部屋を調べて脱出しよう！", 4000)
        );
    }

    #[test]
    fn double_start_keeps_original_start_time() {
        let (mut room, clock) = started_room();
        clock.advance(30_000.0);
        room.start_session();
        assert_eq!(room.state().start_time, Some(10_000.0));
        assert!(room.drain_events().is_empty());
    }

    #[test]
    fn nothing_happens_before_start() {
        let (mut room, _clock) = make_room();
        assert_eq!(room.investigate(ObjectId::Desk), Investigation::Ignored);
        assert_eq!(room.attempt_safe_open(), SafeAccess::Ignored);
        assert_eq!(room.attempt_door(), DoorOutcome::Ignored);
        room.click_object(ObjectId::Lamp);
        assert_eq!(room.hints_found(), 0);
        assert!(room.drain_events().is_empty());
    }

    #[test]
    fn restart_resets_everything() {
        let (mut room, _clock) = started_room();
        for obj in [ObjectId::Desk, ObjectId::Painting, ObjectId::Calendar] {
            room.investigate(obj);
        }
        room.submit_code("1117").unwrap();
        room.attempt_door();
        assert!(room.state().escaped);

        room.restart();
        assert_eq!(*room.state(), GameState::new("1117"));
        for id in ClueId::ALL {
            assert!(!room.is_discovered(id));
        }
        let events = room.drain_events();
        assert!(events.contains(&ViewEvent::SessionReset));
        assert!(events.contains(&ViewEvent::HintCounter { found: 0, total: 7 }));
    }

    #[test]
    fn restart_cancels_pending_reveal() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        room.submit_code("1117").unwrap();
        room.restart();
        room.drain_events();
        room.tick(20);
        assert!(room.drain_events().is_empty());
    }

    // ── investigate ─────────────────────────────────────────

    #[test]
    fn first_investigation_discovers() {
        let (mut room, _clock) = started_room();
        let outcome = room.investigate(ObjectId::Lamp);
        assert_eq!(
            outcome,
            Investigation::Discovered { clue: ClueId::Lamp, item_dropped: false }
        );
        assert_eq!(room.hints_found(), 1);
        assert_eq!(room.state().discovered_clues, vec![ClueId::Lamp]);

        let events = room.drain_events();
        assert!(events.contains(&ViewEvent::ObjectFound(ClueId::Lamp)));
        assert!(events.contains(&ViewEvent::ShowClue {
            clue: ClueId::Lamp,
            text: room.clue(ClueId::Lamp).hint,
            glyph: None,
            review: false,
        }));
        assert!(events.contains(&ViewEvent::HintCounter { found: 1, total: 7 }));
    }

    #[test]
    fn desk_yields_the_key() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        assert_eq!(room.inventory(), &[ItemId::Key]);
        let events = room.drain_events();
        assert!(events.contains(&ViewEvent::Inventory(vec![ItemId::Key])));
    }

    #[test]
    fn reinvestigation_is_a_review() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        let before = room.state().clone();
        room.drain_events();

        assert_eq!(room.investigate(ObjectId::Desk), Investigation::Reviewed(ClueId::Desk));
        assert_eq!(*room.state(), before);
        assert_eq!(
            room.drain_events(),
            vec![ViewEvent::ShowClue {
                clue: ClueId::Desk,
                text: room.clue(ClueId::Desk).hint,
                glyph: Some(ItemId::Key),
                review: true,
            }]
        );
    }

    #[test]
    fn decorative_object_has_nothing() {
        let (mut room, _clock) = started_room();
        assert_eq!(room.investigate(ObjectId::Window), Investigation::NothingHere);
        assert_eq!(room.hints_found(), 0);
        assert_eq!(messages(&room.drain_events()), vec!["特に何もないようだ..."]);
    }

    #[test]
    fn full_inventory_drops_item() {
        let clock = ManualClock::new(0.0);
        let config = RoomConfig {
            inventory_slots: 0,
            ..RoomConfig::default()
        };
        let mut room = RoomController::new(config, Box::new(clock));
        room.start_session();
        assert_eq!(
            room.investigate(ObjectId::Desk),
            Investigation::Discovered { clue: ClueId::Desk, item_dropped: true }
        );
        assert!(room.inventory().is_empty());
        assert!(room.is_discovered(ClueId::Desk));
    }

    #[test]
    fn click_object_routes_safe_and_door() {
        let (mut room, _clock) = started_room();
        room.click_object(ObjectId::Safe);
        assert_eq!(
            messages(&room.drain_events()),
            vec!["金庫には鍵が必要だ... 机を調べてみよう"]
        );
        room.click_object(ObjectId::Door);
        assert_eq!(
            messages(&room.drain_events()),
            vec!["ドアには鍵がかかっている... 金庫を開ける必要がありそうだ"]
        );
        assert_eq!(room.hints_found(), 0);
    }

    // ── safe ────────────────────────────────────────────────

    #[test]
    fn safe_requires_key() {
        let (mut room, _clock) = started_room();
        for obj in [ObjectId::Lamp, ObjectId::Calendar, ObjectId::Painting, ObjectId::Clock] {
            room.investigate(obj);
        }
        room.drain_events();
        assert_eq!(room.attempt_safe_open(), SafeAccess::NeedKey);
        assert!(!room.drain_events().contains(&ViewEvent::OpenCodeSurface));
        assert!(!room.state().escaped);
    }

    #[test]
    fn safe_opens_with_key() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        room.drain_events();
        assert_eq!(room.attempt_safe_open(), SafeAccess::Opened);
        assert_eq!(room.drain_events(), vec![ViewEvent::OpenCodeSurface]);
    }

    // ── code ────────────────────────────────────────────────

    #[test]
    fn correct_code_unlocks_then_reveals() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        room.drain_events();

        assert_eq!(room.submit_code("1117"), Ok(CodeOutcome::Accepted));
        assert!(room.door_unlocked());
        assert_eq!(room.drain_events(), vec![ViewEvent::CodeFeedback { correct: true }]);

        room.tick(9);
        assert!(room.drain_events().is_empty());
        room.tick(1);
        assert_eq!(
            room.drain_events(),
            vec![
                ViewEvent::CloseCodeSurface,
                ViewEvent::DoorUnlocked { narrative: UNLOCK_NARRATIVE },
            ]
        );
    }

    #[test]
    fn wrong_code_hints_and_clears_later() {
        let (mut room, _clock) = started_room();
        assert_eq!(room.submit_code("1234"), Ok(CodeOutcome::Rejected));
        assert!(!room.door_unlocked());
        let events = room.drain_events();
        assert_eq!(events[0], ViewEvent::CodeFeedback { correct: false });
        assert_eq!(messages(&events), vec!["コードが違う... 部屋をもっと調べてみよう"]);

        room.tick(10);
        assert_eq!(room.drain_events(), vec![ViewEvent::ClearCodeEntry]);
    }

    #[test]
    fn wrong_length_is_rejected_without_state_change() {
        let (mut room, _clock) = started_room();
        let before = room.state().clone();
        assert_eq!(room.submit_code("111"), Err(CodeError::WrongLength(3)));
        assert_eq!(room.submit_code("11170"), Err(CodeError::WrongLength(5)));
        assert_eq!(room.submit_code("11a7"), Err(CodeError::NotDigit('a')));
        assert_eq!(*room.state(), before);
        assert_eq!(
            messages(&room.drain_events()),
            vec!["4桁のコードを入力してください"; 3]
        );
    }

    #[test]
    fn wrong_code_hint_priority() {
        let mut book = ClueBook::new();
        assert_eq!(wrong_code_message(&book), "コードが違う... 部屋をもっと調べてみよう");

        book.get_mut(ClueId::Calendar).discovered = true;
        assert_eq!(wrong_code_message(&book), "コードが違う... 額縁の写真を確認してみては？");

        book.get_mut(ClueId::Calendar).discovered = false;
        book.get_mut(ClueId::Painting).discovered = true;
        assert_eq!(wrong_code_message(&book), "コードが違う... カレンダーを確認してみては？");

        book.get_mut(ClueId::Calendar).discovered = true;
        assert_eq!(wrong_code_message(&book), "コードが違う...");
    }

    // ── door / finish ───────────────────────────────────────

    #[test]
    fn elapsed_time_reported_in_minutes_and_seconds() {
        let (mut room, clock) = started_room();
        room.investigate(ObjectId::Desk);
        room.submit_code("1117").unwrap();
        clock.advance(125_000.0);

        let DoorOutcome::Escaped(elapsed) = room.attempt_door() else {
            panic!("door should open");
        };
        assert_eq!(elapsed.to_string(), "2分5秒");
        assert!(room
            .drain_events()
            .contains(&ViewEvent::EscapeSummary(Elapsed { minutes: 2, seconds: 5 })));
    }

    #[test]
    fn escaped_is_terminal() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        room.submit_code("1117").unwrap();
        room.attempt_door();
        room.drain_events();

        assert_eq!(room.investigate(ObjectId::Lamp), Investigation::Ignored);
        assert_eq!(room.attempt_safe_open(), SafeAccess::Ignored);
        assert_eq!(room.attempt_door(), DoorOutcome::Ignored);
        assert_eq!(room.submit_code("0000"), Ok(CodeOutcome::Ignored));
        assert_eq!(room.hints_found(), 1);
        assert!(room.drain_events().is_empty());
    }

    #[test]
    fn finish_twice_keeps_first_time() {
        let (mut room, clock) = started_room();
        clock.advance(61_000.0);
        let first = room.finish_session();
        clock.advance(100_000.0);
        assert_eq!(room.finish_session(), first);
        assert_eq!(first.to_string(), "1分1秒");
    }

    #[test]
    fn resubmitting_code_reveals_once() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        room.attempt_safe_open();
        assert_eq!(room.submit_code("1117"), Ok(CodeOutcome::Accepted));
        // panel closed and reopened before the reveal fires
        room.attempt_safe_open();
        assert_eq!(room.submit_code("1117"), Ok(CodeOutcome::Accepted));
        room.drain_events();

        for _ in 0..10 {
            room.tick(1);
        }
        let events = room.drain_events();
        let reveals = events
            .iter()
            .filter(|e| matches!(e, ViewEvent::DoorUnlocked { .. }))
            .count();
        let closes = events
            .iter()
            .filter(|e| **e == ViewEvent::CloseCodeSurface)
            .count();
        assert_eq!(reveals, 1);
        assert_eq!(closes, 2);
        assert!(room.door_unlocked());
    }

    #[test]
    fn reopening_after_reveal_does_not_repeat_narrative() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        room.submit_code("1117").unwrap();
        room.tick(10);
        room.drain_events();

        room.attempt_safe_open();
        room.submit_code("1117").unwrap();
        room.tick(10);
        let events = room.drain_events();
        assert!(events.contains(&ViewEvent::CloseCodeSurface));
        assert!(!events.iter().any(|e| matches!(e, ViewEvent::DoorUnlocked { .. })));
    }

    #[test]
    fn reveal_skipped_after_early_escape() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        room.submit_code("1117").unwrap();
        assert!(matches!(room.attempt_door(), DoorOutcome::Escaped(_)));
        room.drain_events();

        room.tick(10);
        assert!(room.drain_events().is_empty());
    }

    #[test]
    fn door_before_start_does_not_escape() {
        let (mut room, _clock) = make_room();
        assert_eq!(room.attempt_door(), DoorOutcome::Ignored);
        assert!(!room.state().escaped);
        assert_eq!(room.state().elapsed, None);
    }

    // ── scenarios ───────────────────────────────────────────

    #[test]
    fn scenario_full_escape() {
        let (mut room, _clock) = started_room();
        for obj in [ObjectId::Lamp, ObjectId::Desk, ObjectId::Calendar, ObjectId::Painting] {
            room.click_object(obj);
        }
        assert_eq!(room.hints_found(), 4);
        assert_eq!(room.attempt_safe_open(), SafeAccess::Opened);
        assert_eq!(room.submit_code("1117"), Ok(CodeOutcome::Accepted));
        assert!(room.door_unlocked());
        assert!(matches!(room.attempt_door(), DoorOutcome::Escaped(_)));
        assert!(room.state().escaped);
    }

    #[test]
    fn scenario_safe_before_desk() {
        let (mut room, _clock) = started_room();
        assert_eq!(room.attempt_safe_open(), SafeAccess::NeedKey);
        let events = room.drain_events();
        assert!(!events.contains(&ViewEvent::OpenCodeSurface));
        assert_eq!(messages(&events), vec!["金庫には鍵が必要だ... 机を調べてみよう"]);
        assert!(!room.state().escaped);
    }

    #[test]
    fn state_snapshot_serializes() {
        let (mut room, _clock) = started_room();
        room.investigate(ObjectId::Desk);
        let json = serde_json::to_value(room.state()).unwrap();
        assert_eq!(json["hints_found"], 1);
        assert_eq!(json["inventory"][0], "key");
        assert_eq!(json["discovered_clues"][0], "desk");
        assert_eq!(json["safe_code"], "1117");
    }
}
