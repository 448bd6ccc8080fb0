// Test canvas that records every primitive instead of rasterising it.

use glam::Vec2;

use super::{BlendMode, Canvas, Rect, RenderError, Rgba};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    Blend(BlendMode),
    Color(Rgba),
    Line(Vec2, Vec2),
    Outline(Rect),
    Fill(Rect),
    Clear(Rgba),
    FrameRate(f32, f32),
}

#[derive(Default)]
pub(crate) struct Recorder {
    pub ops: Vec<Op>,
    /// Fail the n-th primitive call (0-based) with a back-end error.
    pub fail_at: Option<usize>,
}

impl Recorder {
    fn push(&mut self, op: Op) -> Result<(), RenderError> {
        if self.fail_at == Some(self.ops.len()) {
            return Err(RenderError::Backend("recorder: injected failure".into()));
        }
        self.ops.push(op);
        Ok(())
    }

    /// Every `fill_rect` paired with the colour active at the time.
    pub fn fills(&self) -> Vec<(Rgba, Rect)> {
        self.with_color(|op| match op {
            Op::Fill(r) => Some(*r),
            _ => None,
        })
    }

    /// Every `draw_line` paired with the colour active at the time.
    pub fn lines(&self) -> Vec<(Rgba, Vec2, Vec2)> {
        self.with_color(|op| match op {
            Op::Line(a, b) => Some((*a, *b)),
            _ => None,
        })
        .into_iter()
        .map(|(c, (a, b))| (c, a, b))
        .collect()
    }

    fn with_color<T>(&self, pick: impl Fn(&Op) -> Option<T>) -> Vec<(Rgba, T)> {
        let mut color = Rgba::default();
        let mut out = Vec::new();
        for op in &self.ops {
            if let Op::Color(c) = op {
                color = *c;
            }
            if let Some(v) = pick(op) {
                out.push((color, v));
            }
        }
        out
    }
}

impl Canvas for Recorder {
    fn set_blend_mode(&mut self, mode: BlendMode) -> Result<(), RenderError> {
        self.push(Op::Blend(mode))
    }

    fn set_draw_color(&mut self, color: Rgba) -> Result<(), RenderError> {
        self.push(Op::Color(color))
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2) -> Result<(), RenderError> {
        self.push(Op::Line(a, b))
    }

    fn draw_rect(&mut self, rect: &Rect) -> Result<(), RenderError> {
        self.push(Op::Outline(*rect))
    }

    fn fill_rect(&mut self, rect: &Rect) -> Result<(), RenderError> {
        self.push(Op::Fill(*rect))
    }

    fn clear(&mut self, color: Rgba) -> Result<(), RenderError> {
        self.push(Op::Clear(color))
    }

    fn write_frame_rate(&mut self, x: f32, y: f32) -> Result<(), RenderError> {
        self.push(Op::FrameRate(x, y))
    }
}
