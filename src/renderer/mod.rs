//! Drawing abstraction layer.
//!
//! *The controller never touches a pixel buffer directly.*
//! It issues float-coordinate primitives against a type that implements
//! [`Canvas`], so the window back-end can be swapped without touching the
//! ray caster.
//!
//! * [`software::Software`] rasterises into a `0x00RRGGBB` frame-buffer that
//!   `minifb` can present as-is.
//! * Every primitive returns `Result`; failures are handed back to the host
//!   unchanged.

use glam::Vec2;
use thiserror::Error;

pub mod overlay;
#[cfg(test)]
pub(crate) mod recorder;
pub mod software;

pub use software::Software;

/// Packed colour, byte order **R G B A** from the most significant byte.
///
/// The packing is explicit; never reinterpret the bytes in native order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const WHITE: Rgba = Rgba(0xFFFF_FFFF);
    pub const RED: Rgba = Rgba(0xFF00_00FF);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Same RGB, new alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self((self.0 & 0xFFFF_FF00) | a as u32)
    }
}

/// Axis-aligned rectangle in canvas units (top-left origin).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

/// How a primitive combines with what is already on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Overwrite the destination, alpha ignored.
    #[default]
    None,
    /// Classic `src·a + dst·(1 − a)`.
    Blend,
}

/// Failures surfaced by a [`Canvas`] primitive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A primitive was handed NaN or infinite coordinates.
    #[error("{primitive}: non-finite coordinates")]
    NonFinite { primitive: &'static str },

    /// Back-end specific failure (window closed, surface lost, …).
    #[error("canvas back-end: {0}")]
    Backend(String),
}

/// Draw primitives the core requires from its host.
///
/// Colour is sticky: `set_draw_color` applies to every following
/// `draw_*`/`fill_*` call until changed.
pub trait Canvas {
    fn set_blend_mode(&mut self, mode: BlendMode) -> Result<(), RenderError>;

    fn set_draw_color(&mut self, color: Rgba) -> Result<(), RenderError>;

    fn draw_line(&mut self, a: Vec2, b: Vec2) -> Result<(), RenderError>;

    /// Outline only.
    fn draw_rect(&mut self, rect: &Rect) -> Result<(), RenderError>;

    fn fill_rect(&mut self, rect: &Rect) -> Result<(), RenderError>;

    /// Fill the whole canvas, ignoring blend mode.
    fn clear(&mut self, color: Rgba) -> Result<(), RenderError>;

    /// Frame-rate overlay with its top-left corner at `(x, y)`.
    fn write_frame_rate(&mut self, x: f32, y: f32) -> Result<(), RenderError>;
}

pub(crate) fn check_finite(primitive: &'static str, pts: &[f32]) -> Result<(), RenderError> {
    if pts.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RenderError::NonFinite { primitive })
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_msb_first() {
        let c = Rgba(0x99CC_99FF);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x99, 0xCC, 0x99, 0xFF));
        assert_eq!(Rgba::new(0x99, 0xCC, 0x99, 0xFF), c);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Rgba(0x0099_CCFF).with_alpha(0x10);
        assert_eq!(c, Rgba(0x0099_CC10));
    }

    #[test]
    fn non_finite_rect_is_flagged() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 1.0).is_finite());
        assert_eq!(
            check_finite("draw_line", &[0.0, f32::INFINITY]),
            Err(RenderError::NonFinite {
                primitive: "draw_line"
            })
        );
    }
}
