//! Held-key movement: step, back-step, strafe / orbit-strafe and turning.
//!
//! Every translation goes through [`attempt_move`]; a refused step leaves
//! the observer where it was.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{Vec2, vec2};

use crate::sim::collision::attempt_move;
use crate::sim::input::{InputState, Key, MouseButtons};
use crate::world::{
    Observer, Scene,
    geometry::{line_length, translate_point},
};

/// Pointer closer than this (Manhattan) while LEFT is held: step onto it.
const SNAP_DISTANCE: f32 = 2.0;

/// One step along the heading, or onto the pointer when it is right here.
pub fn forward(
    observer: &mut Observer,
    scene: &Scene,
    step: f64,
    pointer: (Vec2, MouseButtons),
) -> bool {
    let (at, buttons) = pointer;
    let pos = observer.position();
    let manhattan = (at.x - pos.x).abs() + (at.y - pos.y).abs();
    let target = if buttons == MouseButtons::LEFT && manhattan <= SNAP_DISTANCE {
        at
    } else {
        translate_point(pos, observer.heading(), step)
    };
    attempt_move(observer, scene, target)
}

pub fn backwards(observer: &mut Observer, scene: &Scene, step: f64) -> bool {
    let target = translate_point(observer.position(), observer.heading() + PI, step);
    attempt_move(observer, scene, target)
}

/// Side-step, or orbit the pointer while any button is held.
///
/// Orbiting keeps the distance to the pointer and leaves the view aimed at it.
/// A pointer sitting exactly on the observer gives no orbit and no move.
pub fn strafe(
    observer: &mut Observer,
    scene: &Scene,
    clockwise: bool,
    step: f64,
    pointer: (Vec2, MouseButtons),
) -> bool {
    let (at, buttons) = pointer;
    if buttons.is_empty() {
        let offset = if clockwise { -FRAC_PI_2 } else { FRAC_PI_2 };
        let target = translate_point(observer.position(), observer.heading() + offset, step);
        return attempt_move(observer, scene, target);
    }

    let r = line_length(observer.position(), at);
    if r == 0.0 {
        return false;
    }
    let t = step / r;
    let angle = if clockwise {
        observer.heading() + t
    } else {
        observer.heading() - t
    };
    let (s, c) = angle.sin_cos();
    let target = vec2(at.x - (s * r) as f32, at.y + (c * r) as f32);
    if !attempt_move(observer, scene, target) {
        return false;
    }
    observer.set_heading_towards(at);
    observer.set_heading(angle);
    true
}

/// Apply one tick of held keys.
///
/// W wins over S.  With Shift, A/D strafe; without, they turn.  A wins over D.
pub fn apply_held_keys(
    observer: &mut Observer,
    scene: &Scene,
    input: &impl InputState,
    step: f64,
) {
    if input.is_key_down(Key::W) {
        forward(observer, scene, step, input.mouse_state());
    } else if input.is_key_down(Key::S) {
        backwards(observer, scene, step);
    }

    let shift = input.is_key_down(Key::Shift);
    if input.is_key_down(Key::A) {
        if shift {
            strafe(observer, scene, true, step, input.mouse_state());
        } else {
            observer.rotate(false);
        }
    } else if input.is_key_down(Key::D) {
        if shift {
            strafe(observer, scene, false, step, input.mouse_state());
        } else {
            observer.rotate(true);
        }
    }
}
