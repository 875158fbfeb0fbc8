//! Pollution feedback for the HUD and water shader
//!
//! Both sinks only listen for `PollutionSet`; the simulation doesn't know
//! they exist.

use crate::consts::{POLLUTION_MAX, POLLUTION_MIN};
use crate::sim::{EventSink, GameEvent};

/// On-screen pollution text
#[derive(Debug, Clone)]
pub struct PollutionLabel {
    pub text: String,
}

impl Default for PollutionLabel {
    fn default() -> Self {
        Self {
            text: format_pollution(POLLUTION_MIN),
        }
    }
}

pub fn format_pollution(level: i32) -> String {
    format!("Pollution: {}", level)
}

impl EventSink for PollutionLabel {
    fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::PollutionSet { level } = event {
            self.text = format_pollution(*level);
        }
    }
}

/// Material parameter for murky water (0 = clean, 1 = saturated)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PollutionTint {
    pub amount: f32,
}

impl EventSink for PollutionTint {
    fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::PollutionSet { level } = event {
            let span = (POLLUTION_MAX - POLLUTION_MIN) as f32;
            self.amount = ((*level - POLLUTION_MIN) as f32 / span).clamp(0.0, 1.0);
        }
    }
}
