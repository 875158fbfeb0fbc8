//! Data-driven game balance
//!
//! `Tuning` is the full set of gameplay constants, loadable from JSON.
//! `TweakRegistry` lists the ones that can be adjusted at runtime, with their
//! bounds, for a debug panel or console.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::spawner::SpawnerConfig;
use crate::sim::squid::SquidConfig;
use crate::sim::trash::TrashConfig;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown tweak parameter `{0}`")]
    UnknownParam(String),
}

/// All gameplay constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed RNG seed (random if absent)
    pub seed: Option<u64>,
    pub squid: SquidConfig,
    pub trash: TrashConfig,
    pub spawner: SpawnerConfig,
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

/// One adjustable value
#[derive(Debug, Clone, Copy)]
pub struct TweakParam {
    /// Display group ("Squid", "Trash")
    pub group: &'static str,
    /// Unique key, e.g. `squid.torque`
    pub key: &'static str,
    pub min: f32,
    pub max: f32,
    get: fn(&Tuning) -> f32,
    set: fn(&mut Tuning, f32),
}

impl TweakParam {
    pub fn get(&self, tuning: &Tuning) -> f32 {
        (self.get)(tuning)
    }

    /// Write a value clamped into bounds, returning what was written
    pub fn set(&self, tuning: &mut Tuning, value: f32) -> f32 {
        let value = value.clamp(self.min, self.max);
        (self.set)(tuning, value);
        value
    }
}

/// Registry of adjustable values
#[derive(Debug, Clone, Default)]
pub struct TweakRegistry {
    params: Vec<TweakParam>,
}

/// Builds a `TweakRegistry`, one group at a time
#[derive(Debug, Default)]
pub struct TweakRegistryBuilder {
    group: &'static str,
    params: Vec<TweakParam>,
}

impl TweakRegistryBuilder {
    /// Following params go in this group
    pub fn group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    pub fn param(
        mut self,
        key: &'static str,
        min: f32,
        max: f32,
        get: fn(&Tuning) -> f32,
        set: fn(&mut Tuning, f32),
    ) -> Self {
        debug_assert!(min <= max, "bad bounds for {key}");
        debug_assert!(
            self.params.iter().all(|p| p.key != key),
            "duplicate tweak {key}"
        );
        self.params.push(TweakParam {
            group: self.group,
            key,
            min,
            max,
            get,
            set,
        });
        self
    }

    pub fn build(self) -> TweakRegistry {
        TweakRegistry {
            params: self.params,
        }
    }
}

impl TweakRegistry {
    pub fn builder() -> TweakRegistryBuilder {
        TweakRegistryBuilder::default()
    }

    /// Everything the game exposes for live tweaking
    pub fn standard() -> Self {
        Self::builder()
            .group("Squid")
            .param(
                "squid.thrust_force",
                0.0,
                20.0,
                |t| t.squid.thrust_force,
                |t, v| t.squid.thrust_force = v,
            )
            .param("squid.torque", -100.0, 100.0, |t| t.squid.torque, |t, v| t.squid.torque = v)
            .param(
                "squid.thrust_time",
                0.0,
                5.0,
                |t| t.squid.thrust_time,
                |t, v| t.squid.thrust_time = v,
            )
            .param(
                "squid.throw_down_factor",
                0.0,
                5.0,
                |t| t.squid.throw_down_factor,
                |t, v| t.squid.throw_down_factor = v,
            )
            .param(
                "squid.throw_velocity_factor",
                0.0,
                5.0,
                |t| t.squid.throw_velocity_factor,
                |t, v| t.squid.throw_velocity_factor = v,
            )
            .param("squid.drop_time", 0.0, 5.0, |t| t.squid.drop_time, |t, v| t.squid.drop_time = v)
            .param(
                "squid.air_gravity_scale",
                -5.0,
                5.0,
                |t| t.squid.medium.air.gravity_scale,
                |t, v| t.squid.medium.air.gravity_scale = v,
            )
            .param(
                "squid.water_gravity_scale",
                -5.0,
                5.0,
                |t| t.squid.medium.water.gravity_scale,
                |t, v| t.squid.medium.water.gravity_scale = v,
            )
            .param(
                "squid.air_linear_drag",
                0.0,
                10.0,
                |t| t.squid.medium.air.linear_drag,
                |t, v| t.squid.medium.air.linear_drag = v,
            )
            .param(
                "squid.water_linear_drag",
                0.0,
                10.0,
                |t| t.squid.medium.water.linear_drag,
                |t, v| t.squid.medium.water.linear_drag = v,
            )
            .param(
                "squid.air_angular_drag",
                0.0,
                25.0,
                |t| t.squid.medium.air.angular_drag,
                |t, v| t.squid.medium.air.angular_drag = v,
            )
            .param(
                "squid.water_angular_drag",
                0.0,
                25.0,
                |t| t.squid.medium.water.angular_drag,
                |t, v| t.squid.medium.water.angular_drag = v,
            )
            .group("Trash")
            .param(
                "trash.pickup_after_drop_delay",
                0.0,
                5.0,
                |t| t.trash.pickup_after_drop_delay,
                |t, v| t.trash.pickup_after_drop_delay = v,
            )
            .param(
                "trash.air_gravity_scale",
                -5.0,
                5.0,
                |t| t.trash.medium.air.gravity_scale,
                |t, v| t.trash.medium.air.gravity_scale = v,
            )
            .param(
                "trash.water_gravity_scale",
                -5.0,
                5.0,
                |t| t.trash.medium.water.gravity_scale,
                |t, v| t.trash.medium.water.gravity_scale = v,
            )
            .param(
                "trash.air_linear_drag",
                0.0,
                10.0,
                |t| t.trash.medium.air.linear_drag,
                |t, v| t.trash.medium.air.linear_drag = v,
            )
            .param(
                "trash.water_linear_drag",
                0.0,
                10.0,
                |t| t.trash.medium.water.linear_drag,
                |t, v| t.trash.medium.water.linear_drag = v,
            )
            .param(
                "trash.air_angular_drag",
                0.0,
                25.0,
                |t| t.trash.medium.air.angular_drag,
                |t, v| t.trash.medium.air.angular_drag = v,
            )
            .param(
                "trash.water_angular_drag",
                0.0,
                25.0,
                |t| t.trash.medium.water.angular_drag,
                |t, v| t.trash.medium.water.angular_drag = v,
            )
            .build()
    }

    pub fn params(&self) -> &[TweakParam] {
        &self.params
    }

    pub fn find(&self, key: &str) -> Option<&TweakParam> {
        self.params.iter().find(|p| p.key == key)
    }

    /// Group names, sorted
    pub fn groups(&self) -> Vec<&'static str> {
        let mut groups: Vec<_> = self.params.iter().map(|p| p.group).collect();
        groups.sort_unstable();
        groups.dedup();
        groups
    }

    /// Params of one group, in registration order
    pub fn params_in<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a TweakParam> + 'a {
        self.params.iter().filter(move |p| p.group == group)
    }

    pub fn get(&self, tuning: &Tuning, key: &str) -> Result<f32, TuningError> {
        self.find(key)
            .map(|p| p.get(tuning))
            .ok_or_else(|| TuningError::UnknownParam(key.to_string()))
    }

    /// Set a value (clamped into bounds). Returns the value actually written.
    pub fn set(&self, tuning: &mut Tuning, key: &str, value: f32) -> Result<f32, TuningError> {
        let Some(param) = self.find(key) else {
            log::warn!("Unknown tweak `{}`", key);
            return Err(TuningError::UnknownParam(key.to_string()));
        };
        let written = param.set(tuning, value);
        log::debug!("Tweak {} = {}", key, written);
        Ok(written)
    }
}
