//! Interactive 2.5D ray-caster.
//!
//! ```bash
//! cargo run --release -- --rays fine --seed 7
//! ```
//!
//! Controls  W/S = forward/back  A/D = turn  Shift+A/D = strafe (orbit while a
//! mouse button is held)  LMB/drag = look at  RMB = drop observer  P = new walls
//! Q = quit

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use glam::{Vec2, vec2};
use minifb::{Key as WinKey, KeyRepeat, MouseMode, Window, WindowOptions};
use rand::{SeedableRng, rngs::StdRng};

use raycaster_rs::{
    config::{Config, RayPreset},
    engine::Controller,
    renderer::Software,
    sim::{Event, InputState, Key, MouseButton, MouseButtons},
};

const TITLE: &str = "Ray Caster";

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Ray-fan density
    #[arg(long, value_enum, default_value_t = RayPreset::Standard)]
    rays: RayPreset,

    /// Seed for scene regeneration (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Target frame rate
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

/*───────────────────────── input plumbing ─────────────────────────*/

fn map_key(k: WinKey) -> Key {
    match k {
        WinKey::W => Key::W,
        WinKey::A => Key::A,
        WinKey::S => Key::S,
        WinKey::D => Key::D,
        WinKey::P => Key::P,
        WinKey::Q => Key::Q,
        WinKey::LeftShift | WinKey::RightShift => Key::Shift,
        _ => Key::Other,
    }
}

const BUTTONS: [(minifb::MouseButton, MouseButton); 3] = [
    (minifb::MouseButton::Left, MouseButton::Left),
    (minifb::MouseButton::Middle, MouseButton::Middle),
    (minifb::MouseButton::Right, MouseButton::Right),
];

/// minifb only offers polled state; edges are turned into events here.
#[derive(Default)]
struct Pointer {
    pos: Vec2,
    buttons: MouseButtons,
}

impl Pointer {
    fn poll(&mut self, win: &Window, out: &mut Vec<Event>) {
        let pos = win
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| vec2(x, y))
            .unwrap_or(self.pos);

        let mut buttons = MouseButtons::empty();
        for (raw, button) in BUTTONS {
            let flag = MouseButtons::from(button);
            let down = win.get_mouse_down(raw);
            buttons.set(flag, down);
            if down != self.buttons.contains(flag) {
                out.push(Event::MouseButton {
                    button,
                    pressed: down,
                    pos,
                });
            }
        }

        if pos != self.pos {
            out.push(Event::MouseMotion { pos, buttons });
        }
        self.pos = pos;
        self.buttons = buttons;
    }
}

fn poll_keys(win: &Window, out: &mut Vec<Event>) {
    for k in win.get_keys_pressed(KeyRepeat::No) {
        out.push(Event::Keyboard {
            key: map_key(k),
            pressed: true,
        });
    }
    for k in win.get_keys_released() {
        out.push(Event::Keyboard {
            key: map_key(k),
            pressed: false,
        });
    }
}

/// Held-key view of the window for the update tick.
struct WindowInput<'a> {
    win: &'a Window,
    pointer: &'a Pointer,
}

impl InputState for WindowInput<'_> {
    fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::W => self.win.is_key_down(WinKey::W),
            Key::A => self.win.is_key_down(WinKey::A),
            Key::S => self.win.is_key_down(WinKey::S),
            Key::D => self.win.is_key_down(WinKey::D),
            Key::P => self.win.is_key_down(WinKey::P),
            Key::Q => self.win.is_key_down(WinKey::Q),
            Key::Shift => {
                self.win.is_key_down(WinKey::LeftShift) || self.win.is_key_down(WinKey::RightShift)
            }
            Key::Other => false,
        }
    }

    fn mouse_state(&self) -> (Vec2, MouseButtons) {
        (self.pointer.pos, self.pointer.buttons)
    }
}

/*──────────────────────────── main ────────────────────────────────*/
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut controller =
        Controller::new(Config::preset(opts.rays), rng).context("invalid viewer configuration")?;

    let (w, h) = controller.config().canvas_size();
    let mut canvas = Software::new(w, h);
    let mut win = Window::new(TITLE, w, h, WindowOptions::default()).context("open window")?;
    win.set_target_fps(opts.fps);

    controller.init(&mut canvas).context("initialise canvas")?;

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    let mut pointer = Pointer::default();
    let mut events = Vec::new();

    while win.is_open() && !controller.quit_requested() {
        let t0 = Instant::now();

        /* events → update → draw */
        events.clear();
        pointer.poll(&win, &mut events);
        poll_keys(&win, &mut events);
        for event in &events {
            controller.events(event);
        }

        controller.update(&WindowInput {
            win: &win,
            pointer: &pointer,
        });

        controller.draw(&mut canvas).context("draw frame")?;
        acc_time += t0.elapsed();
        acc_frames += 1;

        win.update_with_buffer(canvas.pixels(), canvas.width(), canvas.height())
            .context("present frame")?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            log::info!("avg frame: {:.2} ms  ({} frames)", avg_ms, acc_frames);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    println!("Game over");
    Ok(())
}
