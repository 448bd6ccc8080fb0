//! Ray fan → projected columns.
//!
//! Per ray `i`:
//! ```text
//! θᵢ  = ray_start + i·Δθ                 fᵢ = −FOV/2 + i·Δθ
//! hit = nearest ray/wall intersection    d  = cos(fᵢ)·|hit − eye|
//! H   = min(D / d · wallHeight, P_h)     α  = lerp(d², [0, B] → [255, 0])
//! ```
//! A ray that hits nothing keeps the previous hit for its top-down line and
//! draws no column.

use glam::Vec2;

use crate::renderer::{Canvas, Rect, RenderError, Rgba};
use crate::world::{
    FovConstants, Observer, Wall,
    geometry::{line_length, ray_to_wall, translate_point},
};

/// Length of the probe segment that gives a ray its direction.
const PROBE_LENGTH: f64 = 8.0;

/// Top-down ray colour: faint white.
pub const RAY_COLOR: Rgba = Rgba(0xFFFF_FF16);

/// Scratch record of the nearest wall hit, reused across rays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosestHit {
    pub point: Vec2,
    pub color: Rgba,
    pub distance: f64,
}

impl ClosestHit {
    fn at(point: Vec2) -> Self {
        Self {
            point,
            color: Rgba::default(),
            distance: f64::MAX,
        }
    }
}

/// Nearest wall hit by the ray from `origin` along `theta`.
///
/// On a hit `scratch` is overwritten and `true` returned; on a miss `scratch`
/// is left as it was.
pub fn cast_ray(origin: Vec2, theta: f64, walls: &[Wall], scratch: &mut ClosestHit) -> bool {
    let probe = translate_point(origin, theta, PROBE_LENGTH);
    let mut best = f64::MAX;
    let mut found = false;
    for wall in walls {
        if let Some(point) = ray_to_wall(origin, probe, wall.a, wall.b) {
            let d = line_length(origin, point);
            if d < best {
                best = d;
                found = true;
                *scratch = ClosestHit {
                    point,
                    color: wall.color,
                    distance: d,
                };
            }
        }
    }
    found
}

/// Radial distance → distance to the projection plane.
#[inline]
pub fn fisheye_correct(raw: f64, offset: f64) -> f64 {
    offset.cos() * raw
}

/// Projected column height, clamped to `[0, P_h]`.
#[inline]
pub fn column_height(corrected: f64, fov: &FovConstants, wall_height: f64) -> f32 {
    let h = (fov.portal_distance / corrected * wall_height) as f32;
    h.clamp(0.0, fov.portal_height)
}

/// Column alpha from squared distance; `None` once fully transparent.
#[inline]
pub fn shade_alpha(corrected: f64, brightness: f64) -> Option<u8> {
    let alpha = 255.0 - corrected * corrected / brightness * 255.0;
    (alpha > 0.0).then(|| alpha.min(255.0) as u8)
}

/// Owns the per-frame scratch so casting never allocates.
#[derive(Debug)]
pub struct RayCaster {
    hit: ClosestHit,
    column: Rect,
    misses: u32,
}

impl Default for RayCaster {
    fn default() -> Self {
        Self {
            hit: ClosestHit::at(Vec2::ZERO),
            column: Rect::default(),
            misses: 0,
        }
    }
}

impl RayCaster {
    /// Rays that hit nothing during the last frame.
    #[inline]
    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Cast the fan, drawing top-down rays and the view-panel columns.
    pub fn cast_and_draw(
        &mut self,
        canvas: &mut impl Canvas,
        observer: &Observer,
        walls: &[Wall],
        wall_height: f64,
    ) -> Result<(), RenderError> {
        let eye = observer.position();
        let fov = observer.fov();
        let k = fov.constants();

        self.hit = ClosestHit::at(eye);
        self.misses = 0;
        self.column = Rect::new(
            k.portal_rect.x + 1.0,
            k.portal_rect.y + 1.0,
            k.column_width,
            k.portal_height,
        );

        for i in 0..k.ray_count {
            self.column.x = k.portal_rect.x + 1.0 + i as f32 * k.column_width;
            let hit = cast_ray(eye, fov.ray_angle(i), walls, &mut self.hit);

            canvas.set_draw_color(RAY_COLOR)?;
            canvas.draw_line(eye, self.hit.point)?;

            if hit {
                let corrected = fisheye_correct(self.hit.distance, fov.fisheye_offset(i));
                let h = column_height(corrected, k, wall_height);
                self.column.h = h;
                self.column.y = k.portal_rect.y + 1.0 + k.portal_height / 2.0 - h / 2.0;

                if let Some(alpha) = shade_alpha(corrected, k.brightness) {
                    canvas.set_draw_color(self.hit.color.with_alpha(alpha))?;
                    canvas.fill_rect(&self.column)?;
                }
            } else {
                self.misses += 1;
            }
        }

        if self.misses > 0 {
            log::trace!("{} of {} rays hit nothing", self.misses, k.ray_count);
        }
        Ok(())
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, RayPreset};
    use crate::renderer::recorder::{Op, Recorder};
    use crate::world::scene::{GREEN1, GREEN2};
    use glam::vec2;

    fn wall(x1: f32, y1: f32, x2: f32, y2: f32) -> Wall {
        Wall::new(x1, y1, x2, y2, GREEN1)
    }

    #[test]
    fn nearest_of_two_walls_wins() {
        let walls = [
            Wall::new(0.0, 100.0, 600.0, 100.0, GREEN1),
            Wall::new(0.0, 200.0, 600.0, 200.0, GREEN2),
        ];
        let mut hit = ClosestHit::at(Vec2::ZERO);
        assert!(cast_ray(vec2(300.0, 300.0), 0.0, &walls, &mut hit));
        assert_eq!(hit.color, GREEN2);
        assert!((hit.distance - 100.0).abs() < 1e-3);
    }

    #[test]
    fn miss_keeps_previous_scratch() {
        let mut hit = ClosestHit::at(vec2(1.0, 2.0));
        let before = hit;
        assert!(!cast_ray(
            vec2(300.0, 300.0),
            0.0,
            &[wall(0.0, 500.0, 600.0, 500.0)],
            &mut hit
        ));
        assert_eq!(hit, before);
    }

    #[test]
    fn head_on_wall_column_is_clamped_to_panel() {
        let fov = crate::world::Fov::new(&Config::default(), 0.0);
        let k = fov.constants();
        let mut hit = ClosestHit::at(Vec2::ZERO);
        assert!(cast_ray(
            vec2(300.0, 300.0),
            0.0,
            &[wall(0.0, 100.0, 600.0, 100.0)],
            &mut hit
        ));

        let corrected = fisheye_correct(hit.distance, 0.0);
        assert!((corrected - 200.0).abs() < 1e-3);
        // D/200·200 = D ≈ 277.1 > P_h = 229
        assert_eq!(column_height(corrected, k, 200.0), k.portal_height);
    }

    #[test]
    fn fisheye_is_identity_on_axis_and_shrinks_off_axis() {
        assert_eq!(fisheye_correct(123.0, 0.0), 123.0);
        assert!(fisheye_correct(123.0, 0.3) < 123.0);
    }

    #[test]
    fn column_height_stays_within_panel() {
        let k = *crate::world::Fov::new(&Config::default(), 0.0).constants();
        for d in [0.0, 1e-6, 1.0, 50.0, 277.0, 1_000.0, 1e9] {
            let h = column_height(d, &k, 200.0);
            assert!((0.0..=k.portal_height).contains(&h), "d={d} h={h}");
        }
        assert!(column_height(1_000.0, &k, 200.0) < k.portal_height);
    }

    #[test]
    fn shading_decreases_strictly_then_cuts_off() {
        let b = 2.25 * 277.128_f64.powi(2);
        assert_eq!(shade_alpha(0.0, b), Some(255));
        let mut last = 256u32;
        let mut d = 0.0;
        while let Some(a) = shade_alpha(d, b) {
            assert!((a as u32) < last || d == 0.0, "alpha not decreasing at d={d}");
            last = a as u32;
            d += 20.0;
        }
        assert!(d * d >= b - 1.0);
        assert_eq!(shade_alpha(b.sqrt() * 1.0001, b), None);
        assert_eq!(shade_alpha(b.sqrt() * 2.0, b), None);
    }

    #[test]
    fn frame_draws_one_line_per_ray_and_columns_for_hits() {
        let cfg = Config::default();
        let obs = Observer::new(&cfg);
        let walls = crate::world::Scene::new(600.0, 600.0).walls().to_vec();
        let mut rec = Recorder::default();
        let mut caster = RayCaster::default();

        caster.cast_and_draw(&mut rec, &obs, &walls, 200.0).unwrap();

        let lines = rec.ops.iter().filter(|op| matches!(op, Op::Line(..))).count();
        assert_eq!(lines, 50);
        assert_eq!(caster.misses(), 0);
        let fills = rec.fills();
        assert!(!fills.is_empty());
        for (_, r) in &fills {
            assert!(r.h <= 229.0 && r.h >= 0.0);
            assert!(r.x >= 740.0 && r.x + r.w <= 740.0 + 320.0 + 1e-3);
        }
    }

    #[test]
    fn fine_preset_columns_stay_inside_panel() {
        let cfg = Config::preset(RayPreset::Fine);
        let obs = Observer::new(&cfg);
        let walls = crate::world::Scene::new(600.0, 600.0).walls().to_vec();
        let mut rec = Recorder::default();
        let mut caster = RayCaster::default();

        caster.cast_and_draw(&mut rec, &obs, &walls, 200.0).unwrap();

        assert_eq!(rec.lines().len(), 100);
        let fills = rec.fills();
        assert!(!fills.is_empty());
        for (_, r) in &fills {
            assert!(r.x >= 740.0 && r.x + r.w <= 740.0 + 320.0 + 1e-3);
        }
        let (_, last) = fills.last().unwrap();
        assert!(last.x + last.w > 1060.0 - 1e-3);
    }

    #[test]
    fn observer_outside_arena_draws_no_columns() {
        let cfg = Config::default();
        let mut obs = Observer::new(&cfg);
        obs.teleport(vec2(900.0, 300.0));
        obs.set_heading(std::f64::consts::FRAC_PI_2);
        let walls = crate::world::Scene::empty(600.0, 600.0).walls().to_vec();
        let mut rec = Recorder::default();
        let mut caster = RayCaster::default();

        caster.cast_and_draw(&mut rec, &obs, &walls, 200.0).unwrap();

        assert_eq!(caster.misses(), 50);
        assert!(rec.fills().is_empty());
        // top-down rays collapse onto the observer
        for op in &rec.ops {
            if let Op::Line(a, b) = op {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn columns_tile_the_panel_left_to_right() {
        let cfg = Config::default();
        let obs = Observer::new(&cfg);
        let walls = [wall(0.0, 250.0, 600.0, 250.0)];
        let mut rec = Recorder::default();
        RayCaster::default()
            .cast_and_draw(&mut rec, &obs, &walls, 200.0)
            .unwrap();

        let fills = rec.fills();
        assert_eq!(fills.len(), 50);
        for (i, (color, r)) in fills.iter().enumerate() {
            assert!((r.x - (740.0 + i as f32 * 6.4)).abs() < 1e-2);
            assert_eq!(color.r(), GREEN1.r());
            assert!(color.a() < 255);
        }
    }
}
