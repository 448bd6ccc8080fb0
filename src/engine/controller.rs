//! Frame controller: owns the scene, the observer and the frame scratch, and
//! exposes the four callbacks the host drives in a fixed order each frame.
//!
//! ```text
//! events(e)* → update(input) → draw(canvas)
//! ```

use rand::rngs::StdRng;

use crate::config::{Config, ConfigError};
use crate::engine::raycast::RayCaster;
use crate::renderer::{BlendMode, Canvas, RenderError, Rgba};
use crate::sim::{Event, InputState, Key, MouseButton, apply_held_keys};
use crate::world::{Observer, Scene, geometry::translate_point};

/// Canvas clear colour.
pub const BACKGROUND: Rgba = Rgba(0x2323_23FF);

/// View-panel outline.
const PORTAL_COLOR: Rgba = Rgba::RED;

/// Frustum chord on the top-down map.
const FRUSTUM_COLOR: Rgba = Rgba(0xFF00_0080);

/// Frame-rate overlay offset from the arena's right edge.
const FRAME_RATE_INSET: f32 = 115.0;

pub struct Controller {
    config: Config,
    scene: Scene,
    observer: Observer,
    caster: RayCaster,
    rng: StdRng,
    quit: bool,
}

impl Controller {
    /// Stock scene, observer at the configured start, facing north.
    pub fn new(config: Config, rng: StdRng) -> Result<Self, ConfigError> {
        let scene = Scene::new(config.arena_width, config.arena_height);
        Self::with_scene(config, scene, rng)
    }

    pub fn with_scene(config: Config, scene: Scene, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let observer = Observer::new(&config);
        log::info!(
            "arena {}x{}, {} rays, fov {}°/{}°, start {:?}",
            config.arena_width,
            config.arena_height,
            config.ray_count,
            config.h_fov_deg,
            config.v_fov_deg,
            observer.position()
        );
        Ok(Self {
            config,
            scene,
            observer,
            caster: RayCaster::default(),
            rng,
            quit: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Set once `Q` has been pressed; the host should stop its loop.
    #[inline]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /*──────────────────────── host callbacks ───────────────────────*/

    pub fn init(&mut self, canvas: &mut impl Canvas) -> Result<(), RenderError> {
        canvas.set_blend_mode(BlendMode::Blend)
    }

    /// Returns whether the event was consumed.
    pub fn events(&mut self, event: &Event) -> bool {
        match *event {
            Event::MouseButton {
                button,
                pressed: true,
                pos,
            } => {
                if button == MouseButton::Right {
                    log::debug!("teleport to {pos:?}");
                    self.observer.teleport(pos);
                } else {
                    self.observer.set_heading_towards(pos);
                }
                true
            }
            Event::MouseMotion { pos, buttons } if !buttons.is_empty() => {
                self.observer.set_heading_towards(pos);
                true
            }
            Event::Keyboard { key, pressed: true } => {
                match key {
                    Key::Q => {
                        log::info!("quit requested");
                        self.quit = true;
                    }
                    Key::P => self.regenerate_scene(),
                    _ => {}
                }
                true
            }
            _ => false,
        }
    }

    /// One tick of held-key movement.
    pub fn update(&mut self, input: &impl InputState) {
        apply_held_keys(&mut self.observer, &self.scene, input, self.config.step_size);
    }

    pub fn draw(&mut self, canvas: &mut impl Canvas) -> Result<(), RenderError> {
        canvas.clear(BACKGROUND)?;
        self.caster.cast_and_draw(
            canvas,
            &self.observer,
            self.scene.walls(),
            self.config.wall_height,
        )?;
        self.draw_walls(canvas)?;
        self.draw_portal_frame(canvas)?;
        canvas.write_frame_rate(self.config.arena_width - FRAME_RATE_INSET, 0.0)
    }

    /// Replace the interior walls and print them so a good layout can be kept.
    pub fn regenerate_scene(&mut self) {
        self.scene.regenerate(&mut self.rng);
        log::info!("scene regenerated ({} walls)", self.scene.walls().len());
        println!("{}", self.scene.dump_interior());
    }

    /*──────────────────────── top-down view ────────────────────────*/

    fn draw_walls(&self, canvas: &mut impl Canvas) -> Result<(), RenderError> {
        for wall in self.scene.walls() {
            canvas.set_draw_color(wall.color)?;
            canvas.draw_line(wall.a, wall.b)?;
        }
        Ok(())
    }

    fn draw_portal_frame(&self, canvas: &mut impl Canvas) -> Result<(), RenderError> {
        let fov = self.observer.fov();
        let k = fov.constants();
        canvas.set_draw_color(PORTAL_COLOR)?;
        canvas.draw_rect(&k.portal_rect)?;

        let eye = self.observer.position();
        let left = translate_point(eye, fov.ray_start() - k.ray_delta / 2.0, k.portal_distance);
        let right = translate_point(eye, fov.ray_end(), k.portal_distance);
        canvas.set_draw_color(FRUSTUM_COLOR)?;
        canvas.draw_line(left, right)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
