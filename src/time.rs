//! Time sources for the game.
//!
//! - [`GameTime`] turns variable `draw_web()` frame deltas into a fixed
//!   number of discrete ticks per second.
//! - [`Clock`] is the wall clock used for elapsed-time reporting.
//! - [`Scheduler`] holds deferred effects that fire after N ticks, so
//!   delayed transitions are deterministic under test.

#[cfg(test)]
use std::cell::Cell;
#[cfg(test)]
use std::rc::Rc;

/// Game ticks per real-time second.
pub const TICKS_PER_SEC: u32 = 10;

/// Convert a millisecond duration to ticks, rounding up so that short
/// non-zero durations still last at least one tick.
pub fn ms_to_ticks(ms: u32) -> u32 {
    let ms_per_tick = 1000 / TICKS_PER_SEC;
    ms.div_ceil(ms_per_tick)
}

pub struct GameTime {
    /// Milliseconds per tick (e.g. 100ms = 10 ticks/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed wall-clock timestamp (from `performance.now()`).
    /// Returns the number of discrete ticks to process this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // Clamp to avoid spiral-of-death if tab was backgrounded
            Some(prev) => (now_ms - prev).clamp(0.0, 500.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

// ── Wall clock ─────────────────────────────────────────────────

/// Source of "now" in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `Date.now()` in the browser.
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// A settable clock. Clones share the same instant, so a test can keep one
/// handle while the controller owns another.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

// ── Deferred effects ───────────────────────────────────────────

struct Pending<T> {
    ticks_left: u32,
    effect: T,
}

/// Tick-driven queue of fire-and-forget effects.
///
/// There is no per-entry cancellation; [`Scheduler::clear`] drops
/// everything (used on restart).
pub struct Scheduler<T> {
    pending: Vec<Pending<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queue `effect` to fire once `delay_ticks` ticks have elapsed.
    pub fn schedule(&mut self, delay_ticks: u32, effect: T) {
        self.pending.push(Pending {
            ticks_left: delay_ticks,
            effect,
        });
    }

    /// Advance by `delta_ticks` and return the effects that became due,
    /// in the order they were scheduled.
    pub fn advance(&mut self, delta_ticks: u32) -> Vec<T> {
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.pending.len());
        for mut p in self.pending.drain(..) {
            if p.ticks_left <= delta_ticks {
                due.push(p.effect);
            } else {
                p.ticks_left -= delta_ticks;
                remaining.push(p);
            }
        }
        self.pending = remaining;
        due
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
