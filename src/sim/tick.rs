//! Fixed timestep simulation tick
//!
//! One tick is an update phase (input, timers, spawns, contacts) followed by
//! a physics phase (thrust and torque commands for the host physics).

use super::contact::Contact;
use super::events::GameEvent;
use super::state::{GamePhase, GameState};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump went down this frame (edge)
    pub jump_pressed: bool,
    /// Jump is being held
    pub jump_held: bool,
    /// Raw vertical axis (-1..1); full up counts as held thrust
    pub vertical: f32,
    /// Horizontal axis (-1..1), drives torque
    pub horizontal: f32,
    /// Drop everything the squid carries
    pub drop: bool,
    /// Restart the round
    pub restart: bool,
}

/// Advance the game state by one fixed timestep.
///
/// `contacts` are the contacts the host physics reported since the last tick,
/// in the order they happened.
pub fn tick(state: &mut GameState, input: &TickInput, contacts: &[Contact], dt: f32) {
    if input.restart {
        state.restart();
        return;
    }

    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // --- Update phase ---

    for trash in &mut state.trash {
        if trash.tick_cooldown(dt) {
            log::trace!("{} can be picked up again", trash.id);
        }
        trash.update_medium();
    }

    if state.squid.update(input, dt) {
        state.drop_all_trash();
    }

    for order in state.due_spawns(dt) {
        state.spawn_trash(order);
    }

    for contact in contacts {
        state.handle_contact(contact);
    }

    state.update_carried();

    // --- Physics phase ---

    if let Some(impulse) = state.squid.fixed_update() {
        state.events.push(GameEvent::ThrustFired { impulse });
    }

    if state.pollution.loss_triggered() {
        state.phase = GamePhase::GameOver;
    }
}
