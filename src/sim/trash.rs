//! Trash items and their lifecycle
//!
//! Free -> PickedUp -> Dropped (cooldown) -> Free, and from any state with a
//! simulated body into InBoat, which never changes again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::medium::{DualMediumProfile, is_submerged};
use super::timer::Countdown;
use crate::consts::PICKUP_AFTER_DROP_DELAY;

/// Stable trash identity (allocated by `GameState`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrashId(pub u32);

impl std::fmt::Display for TrashId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "trash#{}", self.0)
    }
}

/// Index into the spawner's variant list (which prefab/sprite the host uses)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrashVariant(pub u8);

/// Per-item tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrashConfig {
    /// Seconds after a drop before the item can be picked up again
    pub pickup_after_drop_delay: f32,
    pub medium: DualMediumProfile,
}

impl Default for TrashConfig {
    fn default() -> Self {
        Self {
            pickup_after_drop_delay: PICKUP_AFTER_DROP_DELAY,
            medium: DualMediumProfile::default(),
        }
    }
}

/// Lifecycle state of one trash item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrashState {
    /// Floating or sinking on its own, can be picked up
    Free,
    /// Attached to the squid, body frozen
    PickedUp,
    /// Just let go, pickup blocked until the cooldown elapses
    Dropped { cooldown: Countdown },
    /// Delivered to the boat (terminal)
    InBoat,
}

impl TrashState {
    pub fn name(&self) -> &'static str {
        match self {
            TrashState::Free => "Free",
            TrashState::PickedUp => "PickedUp",
            TrashState::Dropped { .. } => "Dropped",
            TrashState::InBoat => "InBoat",
        }
    }
}

/// A trash entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trash {
    pub id: TrashId,
    pub variant: TrashVariant,
    pub body: Body,
    pub state: TrashState,
    pub submerged: bool,
    pub config: TrashConfig,
}

impl Trash {
    pub fn new(id: TrashId, variant: TrashVariant, pos: Vec2, config: TrashConfig) -> Self {
        let mut trash = Self {
            id,
            variant,
            body: Body::new(pos),
            state: TrashState::Free,
            submerged: false,
            config,
        };
        trash.update_medium();
        trash
    }

    /// Pickup eligibility
    pub fn can_be_picked_up(&self) -> bool {
        self.state == TrashState::Free
    }

    pub fn is_delivered(&self) -> bool {
        self.state == TrashState::InBoat
    }

    /// The host should disable collisions between this item and pickup
    /// detectors while this is true
    pub fn ignores_detector_collision(&self) -> bool {
        !self.can_be_picked_up()
    }

    /// Recompute submersion and switch body coefficients
    pub fn update_medium(&mut self) {
        let (medium, profile) = self.config.medium.select(self.body.pos.y);
        self.submerged = medium.is_water();
        debug_assert_eq!(self.submerged, is_submerged(self.body.pos.y));
        self.body.apply_profile(profile);
    }

    /// Advance the drop cooldown. Returns true if the item became free again.
    pub fn tick_cooldown(&mut self, dt: f32) -> bool {
        if let TrashState::Dropped { ref mut cooldown } = self.state {
            if cooldown.tick(dt) {
                self.state = TrashState::Free;
                return true;
            }
        }
        false
    }

    /// Attach to a carrier at `at`. Only a free item can be attached.
    pub fn attach(&mut self, at: Vec2) -> bool {
        if !self.can_be_picked_up() {
            return false;
        }
        self.body.freeze();
        self.body.pos = at;
        self.state = TrashState::PickedUp;
        true
    }

    /// Keep a carried item at its carrier's attach point
    pub fn follow(&mut self, at: Vec2, rotation: f32) {
        if self.state == TrashState::PickedUp {
            self.body.pos = at;
            self.body.rotation = rotation;
        }
    }

    /// Let go with an exit impulse and start the pickup cooldown
    pub fn detach(&mut self, impulse: Vec2) -> bool {
        if self.state != TrashState::PickedUp {
            return false;
        }
        self.body.release();
        self.body.add_impulse(impulse);
        self.state = TrashState::Dropped {
            cooldown: Countdown::new(self.config.pickup_after_drop_delay),
        };
        true
    }

    /// Land in the boat. Ignored unless the body is being simulated.
    pub fn deliver(&mut self) -> bool {
        if !self.body.simulated || self.is_delivered() {
            return false;
        }
        self.body.freeze();
        self.state = TrashState::InBoat;
        true
    }
}
