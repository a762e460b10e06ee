/// Grandfather's study: a one-room escape game.
///
/// Find the clues, take the key from the desk, open the safe with the
/// birthday code and walk out through the door.

pub mod actions;
pub mod error;
pub mod events;
pub mod logic;
pub mod render;
pub mod state;
pub mod view;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::console;
use crate::games::Game;
use crate::input::{ClickState, InputEvent};
use crate::time::Clock;

use actions::*;
use logic::RoomController;
use state::{ObjectId, RoomConfig};
use view::{Modal, RoomView, Screen, CODE_LEN};

pub struct StudyGame {
    pub room: RoomController,
    pub view: RoomView,
}

impl StudyGame {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self::with_config(RoomConfig::default(), clock)
    }

    pub fn with_config(config: RoomConfig, clock: Box<dyn Clock>) -> Self {
        let view = RoomView::new(config.inventory_slots);
        Self {
            room: RoomController::new(config, clock),
            view,
        }
    }

    /// Feed everything the controller reported into the view.
    fn sync(&mut self) {
        for event in self.room.drain_events() {
            self.view.apply(event);
        }
    }

    fn overlay_open(&self) -> bool {
        self.view.modal.is_some() || self.view.safe.is_some()
    }

    /// Correct code entered; the panel is waiting to close.
    fn code_locked(&self) -> bool {
        matches!(&self.view.safe, Some(panel) if panel.feedback == Some(true))
    }

    fn modal_action(&mut self) {
        match self.view.modal.take() {
            Some(Modal::Unlocked { .. }) => {
                self.room.attempt_door();
            }
            Some(Modal::Clue { .. }) | None => {}
        }
    }

    /// Close whichever overlay is on top.
    fn dismiss(&mut self) {
        if self.view.modal.is_some() {
            self.view.close_modal();
        } else {
            self.view.close_safe();
        }
    }

    fn type_digit(&mut self, ch: char) -> bool {
        if self.code_locked() {
            return false;
        }
        match &mut self.view.safe {
            Some(panel) => panel.entry.push_digit(ch),
            None => false,
        }
    }

    fn erase_digit(&mut self) {
        if self.code_locked() {
            return;
        }
        if let Some(panel) = &mut self.view.safe {
            panel.entry.backspace();
        }
    }

    fn submit_code(&mut self) {
        if self.code_locked() {
            return;
        }
        let Some(panel) = &self.view.safe else {
            return;
        };
        let code = panel.entry.code();
        if let Err(e) = self.room.submit_code(&code) {
            console::log(&format!("code rejected: {}", e));
        }
    }

    fn handle_key(&mut self, event: &InputEvent) -> bool {
        match self.view.screen {
            Screen::Title => match event {
                InputEvent::Key(' ') | InputEvent::Enter => {
                    self.room.start_session();
                    true
                }
                _ => false,
            },
            Screen::Ending(_) => match event {
                InputEvent::Key('r') | InputEvent::Key('R') | InputEvent::Enter => {
                    self.room.restart();
                    true
                }
                _ => false,
            },
            Screen::Room => {
                if self.view.modal.is_some() {
                    return match event {
                        InputEvent::Enter | InputEvent::Key(' ') => {
                            self.modal_action();
                            true
                        }
                        InputEvent::Escape => {
                            self.view.close_modal();
                            true
                        }
                        _ => false,
                    };
                }
                if self.view.safe.is_some() {
                    return match event {
                        InputEvent::Key(ch) => self.type_digit(*ch),
                        InputEvent::Backspace => {
                            self.erase_digit();
                            true
                        }
                        InputEvent::Enter => {
                            self.submit_code();
                            true
                        }
                        InputEvent::Escape => {
                            self.view.close_safe();
                            true
                        }
                        InputEvent::Click(_) => false,
                    };
                }
                match event {
                    InputEvent::Key(ch) => match ObjectId::from_hotkey(*ch) {
                        Some(object) => {
                            self.room.click_object(object);
                            true
                        }
                        None => false,
                    },
                    _ => false,
                }
            }
        }
    }

    fn handle_click(&mut self, id: u16) -> bool {
        match id {
            START if self.view.screen == Screen::Title => {
                self.room.start_session();
                true
            }
            RESTART if matches!(self.view.screen, Screen::Ending(_)) => {
                self.room.restart();
                true
            }
            MODAL_ACTION if self.view.modal.is_some() => {
                self.modal_action();
                true
            }
            CLOSE if self.overlay_open() => {
                self.view.close_all();
                true
            }
            BACKDROP if self.overlay_open() => {
                self.dismiss();
                true
            }
            SUBMIT_CODE => {
                self.submit_code();
                true
            }
            BACKSPACE => {
                self.erase_digit();
                true
            }
            id if (DIGIT_BASE..DIGIT_BASE + 10).contains(&id) => {
                match char::from_digit((id - DIGIT_BASE) as u32, 10) {
                    Some(ch) => self.type_digit(ch),
                    None => false,
                }
            }
            id if (CODE_SLOT_BASE..CODE_SLOT_BASE + CODE_LEN as u16).contains(&id) => {
                if self.code_locked() {
                    return false;
                }
                match &mut self.view.safe {
                    Some(panel) => {
                        panel.entry.focus((id - CODE_SLOT_BASE) as usize);
                        true
                    }
                    None => false,
                }
            }
            id if (OBJECT_BASE..OBJECT_BASE + ObjectId::ALL.len() as u16).contains(&id) => {
                if self.view.screen != Screen::Room || self.overlay_open() {
                    return false;
                }
                self.room
                    .click_object(ObjectId::ALL[(id - OBJECT_BASE) as usize]);
                true
            }
            _ => false,
        }
    }
}

impl Game for StudyGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        let consumed = match event {
            InputEvent::Click(id) => self.handle_click(*id),
            other => self.handle_key(other),
        };
        self.sync();
        consumed
    }

    fn tick(&mut self, delta_ticks: u32) {
        // Count down first so messages raised this tick keep their full time.
        self.view.tick(delta_ticks);
        self.room.tick(delta_ticks);
        self.sync();
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.view, f, area, click_state);
    }
}
