//! Fixed viewer parameters.
//!
//! Everything the arena, observer and view panel are built from lives in one
//! [`Config`].  The two ray-count presets differ only in `ray_count`.

use glam::{Vec2, vec2};
use thiserror::Error;

/// Ray-fan density.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RayPreset {
    /// 50 rays across the field of view.
    #[default]
    Standard,
    /// 100 rays across the field of view.
    Fine,
}

impl RayPreset {
    pub const fn ray_count(self) -> u32 {
        match self {
            RayPreset::Standard => 50,
            RayPreset::Fine => 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Wall height in arena units; scales projected columns.
    pub wall_height: f64,
    pub player_start: Vec2,
    pub eye_height: f32,
    /// View panel width in pixels.
    pub portal_width: f32,
    /// Horizontal field of view, degrees.
    pub h_fov_deg: f64,
    /// Vertical field of view, degrees.
    pub v_fov_deg: f64,
    pub ray_count: u32,
    /// Translation per held-key tick, arena units.
    pub step_size: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::preset(RayPreset::Standard)
    }
}

/// Rejected parameter combinations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ray count must be at least 1")]
    NoRays,

    #[error("{name} field of view {deg}° is outside (0°, 180°)")]
    FovOutOfRange { name: &'static str, deg: f64 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

impl Config {
    pub fn preset(preset: RayPreset) -> Self {
        Self {
            arena_width: 600.0,
            arena_height: 600.0,
            wall_height: 200.0,
            player_start: vec2(300.0, 300.0),
            eye_height: 100.0,
            portal_width: 320.0,
            h_fov_deg: 60.0,
            v_fov_deg: 45.0,
            ray_count: preset.ray_count(),
            step_size: 2.0,
        }
    }

    /// Canvas size the host should open: arena on the left, panel on the right.
    pub fn canvas_size(&self) -> (usize, usize) {
        (
            (self.arena_width * 2.0) as usize,
            self.arena_height as usize,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ray_count == 0 {
            return Err(ConfigError::NoRays);
        }
        for (name, deg) in [("horizontal", self.h_fov_deg), ("vertical", self.v_fov_deg)] {
            if !(deg > 0.0 && deg < 180.0) {
                return Err(ConfigError::FovOutOfRange { name, deg });
            }
        }
        for (name, value) in [
            ("arena width", self.arena_width as f64),
            ("arena height", self.arena_height as f64),
            ("portal width", self.portal_width as f64),
            ("wall height", self.wall_height),
            ("step size", self.step_size),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}
