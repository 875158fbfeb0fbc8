//! Periodic trash spawner
//!
//! Drops a new item on the water surface every `time_between_spawn` seconds,
//! at a random horizontal position. No cap and no despawn.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::timer::Repeating;
use super::trash::TrashVariant;
use crate::consts::{
    MIN_SPAWN_INTERVAL, SPAWN_INTERVAL, SPAWN_X_MAX, SPAWN_X_MIN, WATER_SURFACE_Y,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds between spawns, never less than `MIN_SPAWN_INTERVAL`
    pub time_between_spawn: f32,
    pub x_min: f32,
    pub x_max: f32,
    pub spawn_y: f32,
    /// Number of trash variants to pick from (1 = always the same one)
    pub variant_count: u8,
}

impl SpawnerConfig {
    /// Spawn period actually used by the timer
    pub fn interval(&self) -> f32 {
        self.time_between_spawn.max(MIN_SPAWN_INTERVAL)
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            time_between_spawn: SPAWN_INTERVAL,
            x_min: SPAWN_X_MIN,
            x_max: SPAWN_X_MAX,
            spawn_y: WATER_SURFACE_Y,
            variant_count: 3,
        }
    }
}

/// What to create for one spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOrder {
    pub variant: TrashVariant,
    pub pos: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashSpawner {
    pub config: SpawnerConfig,
    timer: Repeating,
}

impl TrashSpawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            timer: Repeating::new(config.interval()),
            config,
        }
    }

    /// Seconds until the next spawn
    pub fn until_next(&self) -> f32 {
        self.timer.until_next()
    }

    /// Apply a new config without restarting the current wait
    pub fn reconfigure(&mut self, config: SpawnerConfig) {
        self.timer.set_interval(config.interval());
        self.config = config;
    }

    /// Advance the timer and roll a spawn order for each elapsed period
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> Vec<SpawnOrder> {
        let due = self.timer.tick(dt);
        (0..due).map(|_| self.roll(rng)).collect()
    }

    /// Pick a variant and a position
    pub fn roll(&self, rng: &mut impl Rng) -> SpawnOrder {
        let variant = if self.config.variant_count > 1 {
            TrashVariant(rng.random_range(0..self.config.variant_count))
        } else {
            TrashVariant(0)
        };

        let (lo, hi) = if self.config.x_min <= self.config.x_max {
            (self.config.x_min, self.config.x_max)
        } else {
            (self.config.x_max, self.config.x_min)
        };
        let x = rng.random_range(lo..=hi);

        SpawnOrder {
            variant,
            pos: Vec2::new(x, self.config.spawn_y),
        }
    }
}
