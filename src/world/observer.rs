use std::f64::consts::{PI, TAU};

use glam::Vec2;

use crate::config::Config;
use crate::world::{fov::Fov, geometry::mouse_direction};

/// Heading change per rotate tick: 2°.
pub const ROTATION_STEP: f64 = PI / 90.0;

/// The agent whose view is rendered.
///
/// * Heading: radians, 0 = north (−Y), clockwise positive, kept in `[0, 2π)`.
/// * Eye height only scales the projected columns; there is no vertical motion.
#[derive(Clone, Copy, Debug)]
pub struct Observer {
    position: Vec2,
    heading: f64,
    eye_height: f32,
    fov: Fov,
}

impl Observer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            position: cfg.player_start,
            heading: 0.0,
            eye_height: cfg.eye_height,
            fov: Fov::new(cfg, 0.0),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    #[inline]
    pub fn eye_height(&self) -> f32 {
        self.eye_height
    }

    #[inline]
    pub fn fov(&self) -> &Fov {
        &self.fov
    }

    /// Point the view at `target` and re-aim the ray fan.
    pub fn set_heading_towards(&mut self, target: Vec2) {
        self.set_heading(mouse_direction(self.position, target));
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = heading.rem_euclid(TAU);
        self.fov.aim(self.heading);
    }

    /// Turn by [`ROTATION_STEP`].
    pub fn rotate(&mut self, clockwise: bool) {
        let delta = if clockwise {
            ROTATION_STEP
        } else {
            -ROTATION_STEP
        };
        self.set_heading(self.heading + delta);
    }

    /// Jump to `point` without any collision check.
    pub fn teleport(&mut self, point: Vec2) {
        self.position = point;
    }
}
