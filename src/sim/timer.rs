//! Frame-driven timers
//!
//! Timers are plain state advanced by the tick. There is no cancel: once
//! started, a countdown runs until it fires.

use serde::{Deserialize, Serialize};

use crate::consts::TIMER_EPSILON;

/// One-shot countdown in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= TIMER_EPSILON
    }

    /// Advance by `dt`. Returns true once the countdown has elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.is_finished()
    }
}

/// Advance every countdown in `timers`, drop the finished ones and return
/// how many fired this step.
pub fn tick_all(timers: &mut Vec<Countdown>, dt: f32) -> usize {
    let before = timers.len();
    timers.retain_mut(|t| !t.tick(dt));
    before - timers.len()
}

/// Periodic timer that fires every `interval` seconds, forever
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Repeating {
    interval: f32,
    until_next: f32,
}

impl Repeating {
    /// First fire happens one full interval after creation
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            until_next: interval,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Change the period. The current wait is kept as is.
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
    }

    pub fn until_next(&self) -> f32 {
        self.until_next.max(0.0)
    }

    /// Advance by `dt`, returning how many periods elapsed.
    /// Leftover time carries into the next period so the cadence doesn't drift.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.until_next -= dt;
        if self.until_next > TIMER_EPSILON {
            return 0;
        }
        // Closed form: `interval` may be below the f32 resolution of `until_next`
        let periods = ((TIMER_EPSILON - self.until_next) / self.interval).floor() + 1.0;
        self.until_next += periods * self.interval;
        // Float to int casts saturate
        periods as u32
    }
}
