//! Pool configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::non_negative;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Instances allocated at initialization
    pub initial_capacity: usize,
    /// Hard ceiling on pool capacity
    pub max_capacity: usize,
    /// Fraction of current capacity added per growth step
    pub growth_fraction: f32,

    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Projectile baseline ===
    pub default_damage: f32,
    pub default_collider_radius: f32,
    /// Sprite-sheet frame duration (ms)
    pub animation_frame_ms: f32,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_POOL_SIZE,
            max_capacity: MAX_POOL_SIZE,
            growth_fraction: GROWTH_FRACTION,

            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            default_damage: DEFAULT_DAMAGE,
            default_collider_radius: DEFAULT_COLLIDER_RADIUS,
            animation_frame_ms: ANIMATION_FRAME_MS,
        }
    }
}

impl PoolSettings {
    /// Settings with a given capacity range and defaults elsewhere
    pub fn with_capacity(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity,
            ..Self::default()
        }
    }

    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.playfield_width, self.playfield_height)
    }

    /// Clamp degenerate values into a usable configuration
    pub fn sanitized(mut self) -> Self {
        self.initial_capacity = self.initial_capacity.max(1);
        self.max_capacity = self.max_capacity.max(self.initial_capacity);
        if self.growth_fraction.is_nan() || self.growth_fraction <= 0.0 {
            self.growth_fraction = GROWTH_FRACTION;
        }
        self.playfield_width = non_negative(self.playfield_width);
        self.playfield_height = non_negative(self.playfield_height);
        self.default_damage = non_negative(self.default_damage);
        self.default_collider_radius = non_negative(self.default_collider_radius);
        self.animation_frame_ms = non_negative(self.animation_frame_ms);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded pool settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Invalid pool settings {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read pool settings {}: {}", path.display(), e),
        }

        log::info!("Using default pool settings");
        Self::default()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
