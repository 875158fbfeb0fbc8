//! The player's squid
//!
//! Thrust, torque, medium switching and the carried-trash roster. The squid
//! never touches trash state directly: `GameState` routes pickups and drops
//! between the squid and the trash items.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::contact::DetectorId;
use super::medium::DualMediumProfile;
use super::tick::TickInput;
use super::timer::{self, Countdown};
use super::trash::TrashId;
use crate::{direction_from_degrees, rotate_local};

/// How jump input turns into thrust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThrustPolicy {
    /// Fire on every press, no cooldown
    Spam,
    /// Fire while held and submerged, at most once per thrust time
    #[default]
    Held,
}

/// Squid tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquidConfig {
    /// Impulse magnitude per thrust
    pub thrust_force: f32,
    /// Thrust direction in the squid's local frame (degrees, 0 = +x)
    pub thrust_direction_degrees: f32,
    /// Torque at full horizontal input
    pub torque: f32,
    /// Held-thrust cooldown (seconds)
    pub thrust_time: f32,
    /// Downward part of the drop impulse
    pub throw_down_factor: f32,
    /// Share of the squid's velocity given to dropped trash
    pub throw_velocity_factor: f32,
    /// Pickup lockout after a drop (seconds)
    pub drop_time: f32,
    pub thrust_policy: ThrustPolicy,
    pub medium: DualMediumProfile,
    /// Where the pickup detector sits, in the squid's local frame
    pub detector_offset: Vec2,
}

impl Default for SquidConfig {
    fn default() -> Self {
        Self {
            thrust_force: 1.0,
            thrust_direction_degrees: 0.0,
            torque: 1.0,
            thrust_time: 0.5,
            throw_down_factor: 0.5,
            throw_velocity_factor: 0.5,
            drop_time: 0.5,
            thrust_policy: ThrustPolicy::Held,
            medium: DualMediumProfile::default(),
            detector_offset: Vec2::new(0.0, -0.6),
        }
    }
}

/// The squid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Squid {
    pub body: Body,
    pub detector: DetectorId,
    pub config: SquidConfig,
    /// Thrust decided this frame, applied on the next physics step
    pub thrust_queued: bool,
    /// Held-thrust cooldown gate
    pub can_thrust: bool,
    /// Animation flag
    pub thrusting: bool,
    /// Torque applied each physics step
    pub torque: f32,
    pub submerged: bool,
    /// Global pickup gate, closed for a while after each drop
    pub can_pick_up: bool,
    /// Carried trash, in pickup order
    carried: Vec<TrashId>,
    thrust_cooldown: Option<Countdown>,
    /// One per drop; each reopens the gate when it fires
    pickup_gate_timers: Vec<Countdown>,
}

impl Squid {
    pub fn new(pos: Vec2, detector: DetectorId, config: SquidConfig) -> Self {
        let mut squid = Self {
            body: Body::new(pos),
            detector,
            config,
            thrust_queued: false,
            can_thrust: true,
            thrusting: false,
            torque: 0.0,
            submerged: false,
            can_pick_up: true,
            carried: Vec::new(),
            thrust_cooldown: None,
            pickup_gate_timers: Vec::new(),
        };
        squid.update_medium();
        squid
    }

    /// Carried trash in pickup order
    pub fn carried(&self) -> &[TrashId] {
        &self.carried
    }

    pub fn is_carrying(&self, trash: TrashId) -> bool {
        self.carried.contains(&trash)
    }

    /// Per-frame decisions from input. Returns true if a drop-all was requested.
    pub fn update(&mut self, input: &TickInput, dt: f32) -> bool {
        self.tick_timers(dt);

        // Thrust is decided on last frame's medium
        match self.config.thrust_policy {
            ThrustPolicy::Spam => {
                if !self.thrust_queued {
                    self.thrust_queued = input.jump_pressed;
                    self.can_thrust = true;
                }
            }
            ThrustPolicy::Held => self.handle_held_thrust(input),
        }

        self.torque = input.horizontal.clamp(-1.0, 1.0) * self.config.torque;
        self.update_medium();

        // No thrust out of the water
        if !self.submerged {
            self.thrust_queued = false;
        }

        input.drop
    }

    fn handle_held_thrust(&mut self, input: &TickInput) {
        if !self.can_thrust || self.thrust_queued {
            return;
        }
        self.thrust_queued = self.submerged && (input.jump_held || input.vertical >= 1.0);
        if self.thrust_queued {
            self.can_thrust = false;
            self.thrust_cooldown = Some(Countdown::new(self.config.thrust_time));
        }
    }

    fn tick_timers(&mut self, dt: f32) {
        if let Some(cooldown) = self.thrust_cooldown.as_mut() {
            if cooldown.tick(dt) {
                self.thrust_cooldown = None;
                self.can_thrust = true;
            }
        }

        if timer::tick_all(&mut self.pickup_gate_timers, dt) > 0 {
            self.can_pick_up = true;
        }
    }

    fn update_medium(&mut self) {
        let (medium, profile) = self.config.medium.select(self.body.pos.y);
        self.submerged = medium.is_water();
        self.body.apply_profile(profile);
    }

    /// Physics step: apply queued thrust and the current torque.
    /// Returns the world-space thrust impulse if one fired.
    pub fn fixed_update(&mut self) -> Option<Vec2> {
        let mut fired = None;
        if self.thrust_queued {
            fired = Some(self.thrust());
            self.thrusting = true;
        } else if self.can_thrust {
            self.thrusting = false;
        }
        self.body.set_torque(self.torque);
        fired
    }

    fn thrust(&mut self) -> Vec2 {
        let local = self.thrust_vector();
        self.body.add_relative_impulse(local);
        self.thrust_queued = false;
        rotate_local(self.body.rotation, local)
    }

    /// Thrust impulse in the local frame
    pub fn thrust_vector(&self) -> Vec2 {
        direction_from_degrees(self.config.thrust_direction_degrees) * self.config.thrust_force
    }

    /// World position of the pickup detector
    pub fn detector_position(&self) -> Vec2 {
        self.body.pos + rotate_local(self.body.rotation, self.config.detector_offset)
    }

    /// Whether an overlap reported for `detector` may turn into a pickup
    pub fn accepts_pickup(&self, detector: DetectorId) -> bool {
        detector == self.detector && self.can_pick_up
    }

    pub(crate) fn push_carried(&mut self, trash: TrashId) {
        if !self.carried.contains(&trash) {
            self.carried.push(trash);
        }
    }

    /// Empty the roster, in pickup order
    pub(crate) fn take_carried(&mut self) -> Vec<TrashId> {
        std::mem::take(&mut self.carried)
    }

    /// Exit impulse for trash being let go right now
    pub fn drop_impulse(&self) -> Vec2 {
        self.body.vel * self.config.throw_velocity_factor
            + Vec2::NEG_Y * self.config.throw_down_factor
    }

    /// Block pickups for `drop_time`
    pub(crate) fn close_pickup_gate(&mut self) {
        self.can_pick_up = false;
        self.pickup_gate_timers.push(Countdown::new(self.config.drop_time));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn squid_at(y: f32, policy: ThrustPolicy) -> Squid {
        let config = SquidConfig {
            thrust_policy: policy,
            ..Default::default()
        };
        Squid::new(Vec2::new(0.0, y), DetectorId(0), config)
    }

    fn held_jump() -> TickInput {
        TickInput {
            jump_held: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_held_thrust_cooldown() {
        let mut squid = squid_at(-5.0, ThrustPolicy::Held);
        let input = held_jump();

        squid.update(&input, SIM_DT);
        assert!(squid.thrust_queued);
        assert!(!squid.can_thrust);
        assert!(squid.fixed_update().is_some());
        assert!(squid.thrusting);
        assert!(!squid.thrust_queued);

        // Held for the rest of the cooldown: no second thrust
        let mut thrusts = 0;
        for _ in 0..59 {
            squid.update(&input, SIM_DT);
            if squid.fixed_update().is_some() {
                thrusts += 1;
            }
        }
        assert_eq!(thrusts, 0);
        assert!(squid.thrusting);

        // Cooldown (0.5s = 60 steps) elapses, the next frame fires again
        squid.update(&input, SIM_DT);
        assert!(squid.thrust_queued);
    }

    #[test]
    fn test_held_thrust_via_vertical_axis() {
        let mut squid = squid_at(-5.0, ThrustPolicy::Held);
        let input = TickInput {
            vertical: 1.0,
            ..Default::default()
        };
        squid.update(&input, SIM_DT);
        assert!(squid.thrust_queued);
    }

    #[test]
    fn test_no_thrust_in_air() {
        let mut squid = squid_at(2.0, ThrustPolicy::Held);
        squid.update(&held_jump(), SIM_DT);
        assert!(!squid.thrust_queued);
        assert!(squid.fixed_update().is_none());

        let mut spam = squid_at(2.0, ThrustPolicy::Spam);
        let press = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        spam.update(&press, SIM_DT);
        assert!(!spam.thrust_queued);
    }

    #[test]
    fn test_spam_thrust_every_press() {
        let mut squid = squid_at(-5.0, ThrustPolicy::Spam);
        let press = TickInput {
            jump_pressed: true,
            ..Default::default()
        };

        for _ in 0..3 {
            squid.update(&press, SIM_DT);
            assert!(squid.thrust_queued);
            assert!(squid.fixed_update().is_some());
        }

        // Holding without a new press edge does nothing
        squid.update(&held_jump(), SIM_DT);
        assert!(!squid.thrust_queued);
        assert!(squid.fixed_update().is_none());
        assert!(!squid.thrusting);
    }

    #[test]
    fn test_thrust_impulse_uses_local_frame() {
        let mut squid = squid_at(-5.0, ThrustPolicy::Spam);
        squid.config.thrust_force = 2.0;
        squid.config.thrust_direction_degrees = 90.0;
        squid.body.rotation = std::f32::consts::FRAC_PI_2;

        let press = TickInput {
            jump_pressed: true,
            ..Default::default()
        };
        squid.update(&press, SIM_DT);
        let impulse = squid.fixed_update().unwrap_or_default();
        // Local +y rotated a quarter turn is world -x
        assert!((impulse - Vec2::new(-2.0, 0.0)).length() < 1e-5);
        assert!((squid.body.commands.impulse - impulse).length() < 1e-6);
    }

    #[test]
    fn test_torque_from_horizontal_axis() {
        let mut squid = squid_at(-5.0, ThrustPolicy::Held);
        squid.config.torque = 4.0;
        let input = TickInput {
            horizontal: -0.5,
            ..Default::default()
        };
        squid.update(&input, SIM_DT);
        squid.fixed_update();
        assert_eq!(squid.torque, -2.0);
        assert_eq!(squid.body.take_commands().torque, -2.0);
    }

    #[test]
    fn test_medium_coefficients() {
        let mut squid = squid_at(3.0, ThrustPolicy::Held);
        assert!(!squid.submerged);
        assert_eq!(squid.body.gravity_scale, 1.0);

        squid.body.pos.y = -1.0;
        squid.update(&TickInput::default(), SIM_DT);
        assert!(squid.submerged);
        assert_eq!(squid.body.gravity_scale, squid.config.medium.water.gravity_scale);
        assert_eq!(squid.body.linear_drag, 1.0);
    }

    #[test]
    fn test_held_thrust_uses_previous_medium() {
        let mut squid = squid_at(3.0, ThrustPolicy::Held);
        let held = TickInput {
            jump_held: true,
            ..Default::default()
        };

        // Just went under: still counted as airborne for this decision
        squid.body.pos.y = -1.0;
        squid.update(&held, SIM_DT);
        assert!(squid.submerged);
        assert!(!squid.thrust_queued);
        assert!(squid.can_thrust);

        squid.update(&held, SIM_DT);
        assert!(squid.thrust_queued);
    }

    #[test]
    fn test_pickup_gate_overlapping_timers() {
        let mut squid = squid_at(-5.0, ThrustPolicy::Held);
        let idle = TickInput::default();

        squid.close_pickup_gate();
        assert!(!squid.accepts_pickup(DetectorId(0)));

        // Second drop 0.25s later starts its own timer
        for _ in 0..30 {
            squid.update(&idle, SIM_DT);
        }
        squid.close_pickup_gate();

        // The first timer still reopens the gate at 0.5s
        for _ in 0..30 {
            squid.update(&idle, SIM_DT);
        }
        assert!(squid.can_pick_up);
        assert!(squid.accepts_pickup(DetectorId(0)));
        assert!(!squid.accepts_pickup(DetectorId(1)));
    }

    #[test]
    fn test_drop_impulse() {
        let mut squid = squid_at(-5.0, ThrustPolicy::Held);
        squid.body.vel = Vec2::new(4.0, 2.0);
        let impulse = squid.drop_impulse();
        assert!((impulse - Vec2::new(2.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_detector_position_rotates() {
        let mut squid = squid_at(-5.0, ThrustPolicy::Held);
        squid.config.detector_offset = Vec2::new(0.0, -1.0);
        squid.body.rotation = std::f32::consts::PI;
        let pos = squid.detector_position();
        assert!((pos - Vec2::new(0.0, -4.0)).length() < 1e-5);
    }
}
