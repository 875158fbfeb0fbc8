//! Pollution meter
//!
//! Goes up by one per spawned trash item and down by one per delivery. Hitting
//! the top ends the round.

use serde::{Deserialize, Serialize};

use crate::consts::{POLLUTION_MAX, POLLUTION_MIN};

/// Outcome of a single adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollutionChange {
    /// Level after clamping
    pub level: i32,
    /// True only for the write that first saturated the meter
    pub triggered_loss: bool,
}

/// Clamped pollution counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pollution {
    level: i32,
    loss_triggered: bool,
}

impl Default for Pollution {
    fn default() -> Self {
        Self::new()
    }
}

impl Pollution {
    pub fn new() -> Self {
        Self {
            level: POLLUTION_MIN,
            loss_triggered: false,
        }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Level as a 0..1 fraction (for meters and shaders)
    pub fn fraction(&self) -> f32 {
        (self.level - POLLUTION_MIN) as f32 / (POLLUTION_MAX - POLLUTION_MIN) as f32
    }

    pub fn is_saturated(&self) -> bool {
        self.level >= POLLUTION_MAX
    }

    pub fn loss_triggered(&self) -> bool {
        self.loss_triggered
    }

    /// Apply `delta`, clamp, and report whether this write triggered the loss
    pub fn adjust(&mut self, delta: i32) -> PollutionChange {
        self.set(self.level.saturating_add(delta))
    }

    /// Write a level directly (clamped)
    pub fn set(&mut self, value: i32) -> PollutionChange {
        self.level = value.clamp(POLLUTION_MIN, POLLUTION_MAX);

        let triggered_loss = self.level == POLLUTION_MAX && !self.loss_triggered;
        if triggered_loss {
            self.loss_triggered = true;
        }

        PollutionChange {
            level: self.level,
            triggered_loss,
        }
    }

    /// Back to zero for a new round
    pub fn reset(&mut self) -> PollutionChange {
        self.loss_triggered = false;
        self.set(POLLUTION_MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamps_at_zero() {
        let mut pollution = Pollution::new();
        let change = pollution.adjust(-1);
        assert_eq!(change.level, 0);
        assert!(!change.triggered_loss);
    }

    #[test]
    fn test_loss_triggers_once() {
        let mut pollution = Pollution::new();
        pollution.set(99);

        let first = pollution.adjust(1);
        assert_eq!(first.level, 100);
        assert!(first.triggered_loss);

        let second = pollution.adjust(1);
        assert_eq!(second.level, 100);
        assert!(!second.triggered_loss);
        assert!(pollution.loss_triggered());
    }

    #[test]
    fn test_big_jump_clamps_and_triggers() {
        let mut pollution = Pollution::new();
        let change = pollution.adjust(250);
        assert_eq!(change.level, 100);
        assert!(change.triggered_loss);
        assert!(pollution.is_saturated());
        assert_eq!(pollution.fraction(), 1.0);
    }

    #[test]
    fn test_reset_rearms_loss() {
        let mut pollution = Pollution::new();
        pollution.adjust(100);
        let change = pollution.reset();
        assert_eq!(change.level, 0);
        assert!(!pollution.loss_triggered());
        assert!(pollution.adjust(100).triggered_loss);
    }

    proptest! {
        #[test]
        fn prop_level_is_clamped_running_sum(deltas in prop::collection::vec(-3i32..=3, 0..400)) {
            let mut pollution = Pollution::new();
            let mut expected = 0i32;
            let mut losses = 0;
            for delta in deltas {
                expected = (expected + delta).clamp(0, 100);
                let change = pollution.adjust(delta);
                prop_assert!((0..=100).contains(&change.level));
                prop_assert_eq!(change.level, expected);
                if change.triggered_loss {
                    losses += 1;
                }
            }
            prop_assert!(losses <= 1);
            prop_assert_eq!(losses == 1, pollution.loss_triggered());
        }
    }
}
