//! Move-or-refuse collision: a step is taken only if the straight path from
//! the current position to the target touches no wall.  There is no sliding;
//! a blocked step is simply dropped.

use glam::Vec2;

use crate::world::{Observer, Scene, Wall, geometry::segments_cross};

/// `true` if the segment `from → to` crosses or touches none of `walls`.
pub fn path_is_clear(walls: &[Wall], from: Vec2, to: Vec2) -> bool {
    !walls.iter().any(|w| segments_cross(from, to, w.a, w.b))
}

/// Move the observer to `target` if nothing is in the way.
///
/// Returns whether the move happened.
pub fn attempt_move(observer: &mut Observer, scene: &Scene, target: Vec2) -> bool {
    if !path_is_clear(scene.walls(), observer.position(), target) {
        log::debug!("move {:?} -> {:?} blocked", observer.position(), target);
        return false;
    }
    observer.teleport(target);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::world::scene::GREEN1;
    use glam::vec2;

    fn scene_with(walls: &[Wall]) -> Scene {
        Scene::with_interior(600.0, 600.0, walls.iter().copied())
    }

    #[test]
    fn blocked_move_leaves_position_unchanged() {
        let scene = scene_with(&[Wall::new(0.0, 298.0, 600.0, 298.0, GREEN1)]);
        let mut obs = Observer::new(&Config::default());
        assert!(!attempt_move(&mut obs, &scene, vec2(300.0, 298.0)));
        assert_eq!(obs.position(), vec2(300.0, 300.0));
    }

    #[test]
    fn free_move_updates_position() {
        let scene = scene_with(&[]);
        let mut obs = Observer::new(&Config::default());
        assert!(attempt_move(&mut obs, &scene, vec2(310.0, 290.0)));
        assert_eq!(obs.position(), vec2(310.0, 290.0));
    }

    #[test]
    fn border_cannot_be_crossed() {
        let scene = scene_with(&[]);
        let mut obs = Observer::new(&Config::default());
        obs.teleport(vec2(300.0, 2.0));
        assert!(!attempt_move(&mut obs, &scene, vec2(300.0, -1.0)));
    }

    #[test]
    fn accepted_moves_never_cross_a_wall() {
        let scene = Scene::new(600.0, 600.0);
        let mut obs = Observer::new(&Config::default());
        // sweep a star of targets around the start point
        for i in 0..64 {
            let theta = i as f64 * std::f64::consts::TAU / 64.0;
            let start = obs.position();
            let target = crate::world::geometry::translate_point(start, theta, 150.0);
            if attempt_move(&mut obs, &scene, target) {
                assert!(path_is_clear(scene.walls(), start, obs.position()));
            }
            obs.teleport(vec2(300.0, 300.0));
        }
    }
}
