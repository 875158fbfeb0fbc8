//! Physics body boundary
//!
//! The host physics engine owns integration. Each frame it writes back
//! position/velocity, and drains the commands the simulation queued.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::medium::MediumProfile;
use crate::rotate_local;

/// Forces queued for the host physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyCommands {
    /// Continuous force (world space)
    pub force: Vec2,
    /// Instant impulse (world space)
    pub impulse: Vec2,
    /// Continuous torque
    pub torque: f32,
}

impl BodyCommands {
    pub fn is_empty(&self) -> bool {
        self.force == Vec2::ZERO && self.impulse == Vec2::ZERO && self.torque == 0.0
    }
}

/// A 2D rigid body as seen by gameplay code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    pub angular_vel: f32,
    /// False while frozen (carried, or resting in the boat)
    pub simulated: bool,
    pub gravity_scale: f32,
    pub linear_drag: f32,
    pub angular_drag: f32,
    /// Pending commands, cleared by `take_commands`
    #[serde(default)]
    pub commands: BodyCommands,
}

impl Body {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
            simulated: true,
            gravity_scale: 1.0,
            linear_drag: 0.0,
            angular_drag: 0.0,
            commands: BodyCommands::default(),
        }
    }

    /// Set gravity and drag from a medium profile
    pub fn apply_profile(&mut self, profile: MediumProfile) {
        self.gravity_scale = profile.gravity_scale;
        self.linear_drag = profile.linear_drag;
        self.angular_drag = profile.angular_drag;
    }

    /// Continuous force for the coming physics steps. Not accumulated:
    /// several sim steps between two drains still report one step's force.
    pub fn set_force(&mut self, force: Vec2) {
        self.commands.force = force;
    }

    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.commands.impulse += impulse;
    }

    /// Impulse given in the body's local frame
    pub fn add_relative_impulse(&mut self, local: Vec2) {
        let world = rotate_local(self.rotation, local);
        self.add_impulse(world);
    }

    /// Continuous torque, same rule as `set_force`
    pub fn set_torque(&mut self, torque: f32) {
        self.commands.torque = torque;
    }

    /// Freeze the body in place (no gravity, no pending motion)
    pub fn freeze(&mut self) {
        self.simulated = false;
        self.vel = Vec2::ZERO;
        self.angular_vel = 0.0;
        self.commands = BodyCommands::default();
    }

    /// Resume simulation from rest
    pub fn release(&mut self) {
        self.simulated = true;
        self.vel = Vec2::ZERO;
    }

    /// Hand pending commands to the host and clear them
    pub fn take_commands(&mut self) -> BodyCommands {
        std::mem::take(&mut self.commands)
    }
}
