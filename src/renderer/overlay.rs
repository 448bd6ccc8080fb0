// Frame-rate overlay: a rolling FPS counter and a tiny built-in bitmap font.
// Glyphs are a const table, so there is nothing to load or free.

use std::time::{Duration, Instant};

use glam::Vec2;

use super::Rect;

/// Glyph cell size in font pixels.
pub const GLYPH_W: usize = 3;
pub const GLYPH_H: usize = 5;

/// On-screen pixels per font pixel.
pub const GLYPH_SCALE: f32 = 2.0;

const WINDOW: Duration = Duration::from_secs(1);

/// Counts presented frames and publishes a whole-number rate once a second.
#[derive(Debug, Clone)]
pub struct FrameRate {
    frames: u32,
    window_start: Instant,
    fps: u32,
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl FrameRate {
    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            window_start: now,
            fps: 0,
        }
    }

    /// Register one frame at `now`; rolls the window when a second has passed.
    pub fn tick(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed >= WINDOW {
            self.fps = (self.frames as f64 / elapsed.as_secs_f64()).round() as u32;
            self.frames = 0;
            self.window_start = now;
        }
    }

    /// Last published rate.
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// `"<fps> FPS"` rendered into `buf` without allocating; returns the used prefix.
    pub fn label<'a>(&self, buf: &'a mut [u8; 16]) -> &'a [u8] {
        let mut digits = [0u8; 10];
        let mut n = self.fps;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for i in 0..len {
            buf[i] = digits[len - 1 - i];
        }
        buf[len..len + 4].copy_from_slice(b" FPS");
        &buf[..len + 4]
    }
}

/// Rows top→bottom, bit 2 = leftmost column.
fn glyph(c: u8) -> Option<[u8; GLYPH_H]> {
    Some(match c {
        b'0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        b'1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        b'2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        b'3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        b'4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        b'5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        b'6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        b'7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        b'8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        b'9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        b'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        b'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        b'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        _ => return None,
    })
}

/// Lit font pixels of `text` as canvas rectangles, starting at `origin`.
///
/// Unknown bytes (including space) advance the pen without drawing.
pub fn glyph_rects(text: &[u8], origin: Vec2) -> impl Iterator<Item = Rect> + '_ {
    let advance = (GLYPH_W + 1) as f32 * GLYPH_SCALE;
    text.iter().enumerate().flat_map(move |(i, &c)| {
        let pen_x = origin.x + i as f32 * advance;
        let rows = glyph(c).unwrap_or([0; GLYPH_H]);
        (0..GLYPH_H).flat_map(move |row| {
            (0..GLYPH_W).filter_map(move |col| {
                let lit = rows[row] & (1 << (GLYPH_W - 1 - col)) != 0;
                lit.then(|| {
                    Rect::new(
                        pen_x + col as f32 * GLYPH_SCALE,
                        origin.y + row as f32 * GLYPH_SCALE,
                        GLYPH_SCALE,
                        GLYPH_SCALE,
                    )
                })
            })
        })
    })
}

/*──────────────────────────────── Tests ───────────────────────────────*/
