//! Game clocks
//!
//! Clocks never tick on their own. Each side's remaining budget is only decremented when
//! that side moves or is timed out, using timestamps the caller supplies. A timestamp earlier
//! than the last tick counts as zero elapsed time.

use chess_engine::Color;
use serde::{Deserialize, Serialize};

/// Total thinking time per side and the Fischer increment credited after each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockBudget {
    pub base_secs: u64,
    #[serde(default)]
    pub increment_secs: u64,
}

impl ClockBudget {
    pub const fn minutes(minutes: u64) -> Self {
        ClockBudget {
            base_secs: minutes * 60,
            increment_secs: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clocks {
    remaining: [u64; 2],
    increment: u64,
    /// Timestamp from which the side to move is being charged.
    last_tick: u64,
}

impl Clocks {
    /// Both sides start with the full budget; the side to move is charged from `now`.
    pub fn start(budget: ClockBudget, now: u64) -> Self {
        Clocks {
            remaining: [budget.base_secs; 2],
            increment: budget.increment_secs,
            last_tick: now,
        }
    }

    pub fn last_tick(&self) -> u64 {
        self.last_tick
    }

    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_tick)
    }

    /// Budget of `color` as recorded at the last tick.
    pub fn recorded(&self, color: Color) -> u64 {
        self.remaining[color.index()]
    }

    /// Budget of `color` at `now`, charging the side to move for time since the last tick.
    pub fn remaining_at(&self, color: Color, to_move: Color, now: u64) -> u64 {
        let recorded = self.recorded(color);
        if color == to_move {
            recorded.saturating_sub(self.elapsed(now))
        } else {
            recorded
        }
    }

    /// Seconds by which `to_move` has overrun its budget at `now`, if it has.
    /// Running out exactly at `now` counts as overrun by zero.
    pub fn overrun(&self, to_move: Color, now: u64) -> Option<u64> {
        let elapsed = self.elapsed(now);
        let recorded = self.recorded(to_move);
        (elapsed >= recorded).then(|| elapsed - recorded)
    }

    /// Charge the mover for its think time, credit the increment and restart the tick for the
    /// opponent. Callers check [`Clocks::overrun`] first.
    pub fn charge_move(&mut self, mover: Color, now: u64) {
        let elapsed = self.elapsed(now);
        let slot = &mut self.remaining[mover.index()];
        *slot = slot.saturating_sub(elapsed).saturating_add(self.increment);
        self.last_tick = self.last_tick.max(now);
    }

    /// Zero out the flagged side's budget.
    pub fn flag(&mut self, color: Color, now: u64) {
        self.remaining[color.index()] = 0;
        self.last_tick = self.last_tick.max(now);
    }
}
