//! Squid Sweep - a 2D arcade game about cleaning up the sea
//!
//! Core modules:
//! - `sim`: Deterministic simulation (trash lifecycle, squid control, pollution)
//! - `session`: Fixed-timestep runner and event publishing for a host
//! - `tuning`: Data-driven game balance and the tweak registry
//! - `hud`: Pollution display/feedback sinks

pub mod hud;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::{Tuning, TuningError, TweakRegistry};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Water surface height. Anything strictly below is submerged.
    pub const WATER_SURFACE_Y: f32 = 0.0;

    /// Where the squid starts each round (just under the surface)
    pub const SQUID_START_X: f32 = 0.0;
    pub const SQUID_START_Y: f32 = -5.0;

    /// Timers finish when this close to zero (absorbs f32 drift at fixed dt)
    pub const TIMER_EPSILON: f32 = 1e-4;

    /// Pollution bounds
    pub const POLLUTION_MIN: i32 = 0;
    pub const POLLUTION_MAX: i32 = 100;

    /// Spawner defaults
    pub const SPAWN_INTERVAL: f32 = 5.0;
    /// Shortest allowed spawn period
    pub const MIN_SPAWN_INTERVAL: f32 = 0.05;
    pub const SPAWN_X_MIN: f32 = -50.0;
    pub const SPAWN_X_MAX: f32 = 50.0;

    /// Seconds after a drop before a trash item can be grabbed again
    pub const PICKUP_AFTER_DROP_DELAY: f32 = 0.4;
}

/// Unit vector for an angle in degrees (0 = +x, counter-clockwise)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Rotate a vector from a body's local frame into world space
#[inline]
pub fn rotate_local(rotation: f32, local: Vec2) -> Vec2 {
    Vec2::from_angle(rotation).rotate(local)
}
