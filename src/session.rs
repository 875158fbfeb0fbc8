//! Host-facing game session
//!
//! Wraps a `GameState` with a fixed-timestep accumulator, collects input and
//! contacts between frames, and pushes the simulation's events out to the
//! subscribed sinks after every step.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{Contact, EventBus, EventSink, GameState, SceneRequest, SinkId, TickInput, tick};
use crate::tuning::{Tuning, TuningError, TweakRegistry};

pub struct Session {
    pub state: GameState,
    /// Input for the next step. One-shot flags are cleared once consumed.
    pub input: TickInput,
    tuning: Tuning,
    tweaks: TweakRegistry,
    bus: EventBus,
    contacts: Vec<Contact>,
    accumulator: f32,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        let seed = tuning.seed.unwrap_or_else(rand::random);
        log::info!("Session starting with seed {}", seed);
        Self {
            state: GameState::with_tuning(seed, &tuning),
            input: TickInput::default(),
            tuning,
            tweaks: TweakRegistry::standard(),
            bus: EventBus::new(),
            contacts: Vec::new(),
            accumulator: 0.0,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn tweaks(&self) -> &TweakRegistry {
        &self.tweaks
    }

    /// Register an event sink. Sinks are called in subscription order.
    pub fn subscribe(&mut self, sink: impl EventSink + 'static) -> SinkId {
        self.bus.subscribe(sink)
    }

    pub fn unsubscribe(&mut self, id: SinkId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Queue a contact reported by the host physics for the next step
    pub fn report_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Change one tunable value on the live game. Returns the clamped value.
    pub fn tweak(&mut self, key: &str, value: f32) -> Result<f32, TuningError> {
        let written = self.tweaks.set(&mut self.tuning, key, value)?;
        self.state.apply_tuning(&self.tuning);
        Ok(written)
    }

    /// Scene change for the host to perform, if any
    pub fn take_scene_request(&mut self) -> Option<SceneRequest> {
        self.state.take_scene_request()
    }

    /// Run as many fixed steps as `dt` covers. Returns the number of steps.
    pub fn update(&mut self, dt: f32) -> u32 {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let contacts = std::mem::take(&mut self.contacts);
            tick(&mut self.state, &self.input, &contacts, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump_pressed = false;
            self.input.drop = false;
            self.input.restart = false;

            self.flush_events();
        }

        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        substeps
    }

    fn flush_events(&mut self) {
        let events = self.state.take_events();
        self.bus.publish_all(&events);
    }
}
