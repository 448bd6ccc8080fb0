//! ---------------------------------------------------------------------------
//! Software (CPU) canvas
//!
//! * Owns a `0x00RRGGBB` frame-buffer that `minifb` presents directly.
//! * Float coordinates are rounded to the nearest pixel; lines are clipped to
//!   the buffer before Bresenham so far-away endpoints stay cheap.
//! * Alpha blending follows [`BlendMode`]; `clear` always overwrites.
//! ---------------------------------------------------------------------------

use std::time::Instant;

use glam::{Vec2, vec2};

use crate::renderer::{
    BlendMode, Canvas, Rect, RenderError, Rgba, check_finite,
    overlay::{FrameRate, glyph_rects},
};

/// CPU frame-buffer canvas.
pub struct Software {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
    color: Rgba,
    blend: BlendMode,
    frame_rate: FrameRate,
}

impl Software {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
            color: Rgba::WHITE,
            blend: BlendMode::None,
            frame_rate: FrameRate::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Finished frame, row-major `0x00RRGGBB`.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at `(x, y)` or `None` when outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Write the current colour at `(x, y)`, honouring the blend mode.
    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = match self.blend {
            BlendMode::None => opaque(self.color),
            BlendMode::Blend => blend_over(self.color, self.pixels[idx]),
        };
    }

    /// Liang–Barsky clip of `a → b` against the buffer rectangle.
    fn clip_line(&self, a: Vec2, b: Vec2) -> Option<(Vec2, Vec2)> {
        let max = vec2(self.width as f32 - 1.0, self.height as f32 - 1.0);
        let d = b - a;
        let mut t0 = 0.0_f32;
        let mut t1 = 1.0_f32;
        for (p, q) in [
            (-d.x, a.x),
            (d.x, max.x - a.x),
            (-d.y, a.y),
            (d.y, max.y - a.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        Some((a + d * t0, a + d * t1))
    }
}

/*──────────────────────── pixel maths ─────────────────────────────────*/

#[inline]
fn opaque(c: Rgba) -> u32 {
    (c.r() as u32) << 16 | (c.g() as u32) << 8 | c.b() as u32
}

/// `src` over `dst` (dst is `0x00RRGGBB`), rounded to nearest.
#[inline]
fn blend_over(src: Rgba, dst: u32) -> u32 {
    let a = src.a() as u32;
    let inv = 255 - a;
    let mix = |s: u8, d: u32| (s as u32 * a + (d & 0xFF) * inv + 127) / 255;
    mix(src.r(), dst >> 16) << 16 | mix(src.g(), dst >> 8) << 8 | mix(src.b(), dst)
}

/*──────────────────────── Canvas trait impl ──────────────────────────*/
impl Canvas for Software {
    fn set_blend_mode(&mut self, mode: BlendMode) -> Result<(), RenderError> {
        self.blend = mode;
        Ok(())
    }

    fn set_draw_color(&mut self, color: Rgba) -> Result<(), RenderError> {
        self.color = color;
        Ok(())
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2) -> Result<(), RenderError> {
        check_finite("draw_line", &[a.x, a.y, b.x, b.y])?;
        let Some((a, b)) = self.clip_line(a, b) else {
            return Ok(());
        };

        /* integer Bresenham, both octant directions */
        let (mut x0, mut y0) = (a.x.round() as i32, a.y.round() as i32);
        let (x1, y1) = (b.x.round() as i32, b.y.round() as i32);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x0, y0);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: &Rect) -> Result<(), RenderError> {
        if !rect.is_finite() {
            return Err(RenderError::NonFinite {
                primitive: "draw_rect",
            });
        }
        let (l, t) = (rect.x, rect.y);
        let (r, b) = (rect.x + rect.w - 1.0, rect.y + rect.h - 1.0);
        self.draw_line(vec2(l, t), vec2(r, t))?;
        self.draw_line(vec2(r, t + 1.0), vec2(r, b))?;
        self.draw_line(vec2(r - 1.0, b), vec2(l, b))?;
        self.draw_line(vec2(l, b - 1.0), vec2(l, t + 1.0))
    }

    fn fill_rect(&mut self, rect: &Rect) -> Result<(), RenderError> {
        if !rect.is_finite() {
            return Err(RenderError::NonFinite {
                primitive: "fill_rect",
            });
        }
        let x0 = rect.x.round().max(0.0) as i32;
        let y0 = rect.y.round().max(0.0) as i32;
        let x1 = (rect.x + rect.w).round().min(self.width as f32) as i32;
        let y1 = (rect.y + rect.h).round().min(self.height as f32) as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.plot(x, y);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Rgba) -> Result<(), RenderError> {
        self.pixels.fill(opaque(color));
        Ok(())
    }

    fn write_frame_rate(&mut self, x: f32, y: f32) -> Result<(), RenderError> {
        check_finite("write_frame_rate", &[x, y])?;
        self.frame_rate.tick(Instant::now());

        let mut buf = [0u8; 16];
        let text = self.frame_rate.label(&mut buf);

        let saved = self.color;
        self.color = Rgba::WHITE;
        for px in glyph_rects(text, vec2(x, y)) {
            self.fill_rect(&px)?;
        }
        self.color = saved;
        Ok(())
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
