//! Air/water medium model
//!
//! Bodies don't simulate buoyancy here. They only switch their gravity and
//! drag coefficients depending on which side of the water surface they are.

use serde::{Deserialize, Serialize};

use crate::consts::WATER_SURFACE_Y;

/// Which medium a body is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medium {
    Air,
    Water,
}

/// Returns true if the given height is below the water surface
#[inline]
pub fn is_submerged(y: f32) -> bool {
    y < WATER_SURFACE_Y
}

impl Medium {
    pub fn at_height(y: f32) -> Self {
        if is_submerged(y) { Medium::Water } else { Medium::Air }
    }

    pub fn is_water(self) -> bool {
        self == Medium::Water
    }
}

/// Physics coefficients applied to a body while in one medium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediumProfile {
    pub gravity_scale: f32,
    pub linear_drag: f32,
    pub angular_drag: f32,
}

/// Air and water coefficient sets for one kind of body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualMediumProfile {
    pub air: MediumProfile,
    pub water: MediumProfile,
}

impl Default for DualMediumProfile {
    fn default() -> Self {
        Self {
            air: MediumProfile {
                gravity_scale: 1.0,
                linear_drag: 0.0,
                angular_drag: 15.0,
            },
            water: MediumProfile {
                gravity_scale: 0.001,
                linear_drag: 1.0,
                angular_drag: 15.0,
            },
        }
    }
}

impl DualMediumProfile {
    /// Coefficients for a medium
    pub fn for_medium(&self, medium: Medium) -> MediumProfile {
        match medium {
            Medium::Air => self.air,
            Medium::Water => self.water,
        }
    }

    /// Pick the medium and its coefficients for a body at height `y`
    pub fn select(&self, y: f32) -> (Medium, MediumProfile) {
        let medium = Medium::at_height(y);
        (medium, self.for_medium(medium))
    }
}
