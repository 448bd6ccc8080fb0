use crate::{config::Config, renderer::Rect};

/// Heading-independent part of the field of view; fixed after construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FovConstants {
    /// Horizontal FoV, radians.
    pub h_fov: f64,
    /// Vertical FoV, radians.
    pub v_fov: f64,
    pub ray_count: u32,
    /// Angular step between neighbouring rays, `h_fov / N`.
    pub ray_delta: f64,
    /// Virtual projection-plane distance `D = (panelW/2) / tan(h_fov/2)`.
    pub portal_distance: f64,
    /// Projected plane height `P_h = ⌊2·D·tan(v_fov/2)⌋`, pixels.
    pub portal_height: f32,
    /// View-panel outline, one pixel of border around the columns.
    pub portal_rect: Rect,
    /// Column width `panelW / N`, pixels.
    pub column_width: f32,
    /// Fisheye offset of ray 0, `−h_fov/2`.
    pub fisheye_start: f64,
    /// Attenuation constant `B = 2.25·D²`: squared distance of zero alpha.
    pub brightness: f64,
}

impl FovConstants {
    pub fn new(cfg: &Config) -> Self {
        let h_fov = cfg.h_fov_deg.to_radians();
        let v_fov = cfg.v_fov_deg.to_radians();
        let portal_distance = (cfg.portal_width as f64 / 2.0) / (h_fov / 2.0).tan();
        let portal_height = ((v_fov / 2.0).tan() * portal_distance * 2.0).floor() as f32;
        let portal_rect = Rect::new(
            cfg.arena_width + cfg.arena_width / 2.0 - cfg.portal_width / 2.0 - 1.0,
            cfg.arena_height / 2.0 - portal_height / 2.0 - 1.0,
            cfg.portal_width + 2.0,
            portal_height + 2.0,
        );
        Self {
            h_fov,
            v_fov,
            ray_count: cfg.ray_count,
            ray_delta: h_fov / cfg.ray_count as f64,
            portal_distance,
            portal_height,
            portal_rect,
            column_width: cfg.portal_width / cfg.ray_count as f32,
            fisheye_start: -h_fov / 2.0,
            brightness: portal_distance * portal_distance * 2.25,
        }
    }
}

/// Field-of-view descriptor: fixed constants plus the ray-fan bounds that
/// follow the heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fov {
    constants: FovConstants,
    ray_start: f64,
    ray_end: f64,
}

impl Fov {
    pub fn new(cfg: &Config, heading: f64) -> Self {
        let mut fov = Self {
            constants: FovConstants::new(cfg),
            ray_start: 0.0,
            ray_end: 0.0,
        };
        fov.aim(heading);
        fov
    }

    /// Re-derive the heading tier; constants are untouched.
    #[inline]
    pub fn aim(&mut self, heading: f64) {
        let half = self.constants.h_fov / 2.0;
        self.ray_start = heading - half + self.constants.ray_delta / 2.0;
        self.ray_end = heading + half;
    }

    #[inline]
    pub fn constants(&self) -> &FovConstants {
        &self.constants
    }

    /// Angle of ray 0, half a step inside the left frustum edge.
    #[inline]
    pub fn ray_start(&self) -> f64 {
        self.ray_start
    }

    /// Right frustum edge.
    #[inline]
    pub fn ray_end(&self) -> f64 {
        self.ray_end
    }

    /// Angle of ray `i`.
    #[inline]
    pub fn ray_angle(&self, i: u32) -> f64 {
        self.ray_start + i as f64 * self.constants.ray_delta
    }

    /// Signed fisheye offset of ray `i` from the view centre.
    #[inline]
    pub fn fisheye_offset(&self, i: u32) -> f64 {
        self.constants.fisheye_start + i as f64 * self.constants.ray_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_reference_layout() {
        let c = FovConstants::new(&Config::default());
        assert!((c.portal_distance - 277.128).abs() < 1e-3);
        assert_eq!(c.portal_height, 229.0);
        assert_eq!(c.portal_rect, Rect::new(739.0, 184.5, 322.0, 231.0));
        assert_eq!(c.column_width, 6.4);
        assert!((c.brightness - 2.25 * 277.128_f64.powi(2)).abs() < 1.0);
        assert!((c.ray_delta - 60f64.to_radians() / 50.0).abs() < 1e-12);
    }

    #[test]
    fn fan_is_centred_on_heading() {
        for heading in [0.0, 1.0, 4.5] {
            let fov = Fov::new(&Config::default(), heading);
            let last = fov.constants().ray_count - 1;
            let mid = (fov.ray_angle(0) + fov.ray_angle(last)) / 2.0;
            assert!((mid - heading).abs() < 1e-9);
            assert!((fov.ray_end() - heading - 30f64.to_radians()).abs() < 1e-12);
        }
    }

    #[test]
    fn aim_moves_only_the_heading_tier() {
        let mut fov = Fov::new(&Config::default(), 0.0);
        let before = *fov.constants();
        fov.aim(2.0);
        assert_eq!(*fov.constants(), before);
        let want = 2.0 - 30f64.to_radians() + before.ray_delta / 2.0;
        assert!((fov.ray_start() - want).abs() < 1e-12);
    }

    #[test]
    fn fisheye_offset_is_zero_at_centre_ray() {
        let fov = Fov::new(&Config::default(), 0.0);
        assert!(fov.fisheye_offset(25).abs() < 1e-12);
        assert!((fov.fisheye_offset(0) + 30f64.to_radians()).abs() < 1e-12);
    }
}
