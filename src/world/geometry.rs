//! Segment maths shared by the ray caster and the collision test.
//!
//! Heading convention: 0 rad points to −Y ("north") and angles grow
//! clockwise, because [`translate_point`] uses `sin θ` on X and `−cos θ` on Y.
//! Every other routine in the crate relies on that.

use std::f64::consts::{PI, TAU};

use glam::{Vec2, vec2};

/// Parametric intersection of the infinite lines through `a1→a2` and `b1→b2`.
///
/// Returns `(t, u)`: the point is `a1 + t·(a2 − a1)` and also `b1 + u·(b2 − b1)`.
/// `None` when the lines are parallel or coincident.
#[inline]
pub fn line_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<(f32, f32)> {
    let den = (a1.x - a2.x) * (b1.y - b2.y) - (a1.y - a2.y) * (b1.x - b2.x);
    if den == 0.0 {
        return None;
    }
    let t = ((a1.x - b1.x) * (b1.y - b2.y) - (a1.y - b1.y) * (b1.x - b2.x)) / den;
    let u = ((a1.x - b1.x) * (a1.y - a2.y) - (a1.y - b1.y) * (a1.x - a2.x)) / den;
    Some((t, u))
}

/// Ray from `origin` through `through` (forward only) against wall `w1–w2`.
///
/// `t > 0` is strict: a wall passing exactly through the origin is not hit.
#[inline]
pub fn ray_to_wall(origin: Vec2, through: Vec2, w1: Vec2, w2: Vec2) -> Option<Vec2> {
    match line_intersect(origin, through, w1, w2) {
        Some((t, u)) if (0.0..=1.0).contains(&u) && t > 0.0 => {
            Some(origin + t * (through - origin))
        }
        _ => None,
    }
}

/// Closed segment `p1–p2` crosses or touches closed segment `w1–w2`.
#[inline]
pub fn segments_cross(p1: Vec2, p2: Vec2, w1: Vec2, w2: Vec2) -> bool {
    matches!(
        line_intersect(p1, p2, w1, w2),
        Some((t, u)) if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&t)
    )
}

/// Euclidean distance, evaluated in f64.
#[inline]
pub fn line_length(a: Vec2, b: Vec2) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Point `length` units from `origin` along heading `theta`.
#[inline]
pub fn translate_point(origin: Vec2, theta: f64, length: f64) -> Vec2 {
    let (s, c) = theta.sin_cos();
    vec2(origin.x + (length * s) as f32, origin.y - (length * c) as f32)
}

/// Clockwise-from-north heading of `target` seen from `anchor`, in `[0, 2π)`.
///
/// This is the only place `atan2` is used.
#[inline]
pub fn mouse_direction(anchor: Vec2, target: Vec2) -> f64 {
    let dx = (target.x - anchor.x) as f64;
    let dy = (target.y - anchor.y) as f64;
    (PI - dx.atan2(dy)).rem_euclid(TAU)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
