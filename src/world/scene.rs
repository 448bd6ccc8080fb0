use std::fmt::{self, Write as _};

use glam::{Vec2, vec2};
use rand::Rng;

use crate::renderer::Rgba;

pub const GREEN1: Rgba = Rgba(0x00FF_00FF);
pub const GREEN2: Rgba = Rgba(0x99CC_99FF);
pub const GREEN3: Rgba = Rgba(0x0099_CCFF);
pub const GREEN4: Rgba = Rgba(0xCC66_99FF);
pub const GREEN5: Rgba = Rgba(0x9933_66FF);
pub const BLUE: Rgba = Rgba(0x0000_FFFF);

/// Interior wall colours, assigned in order on regeneration.
pub const WALL_COLORS: [Rgba; 5] = [GREEN1, GREEN2, GREEN3, GREEN4, GREEN5];

/// Number of walls that make up the arena border.
pub const BORDER_WALLS: usize = 4;

/// Interior walls produced by [`Scene::regenerate`].
pub const INTERIOR_WALLS: usize = WALL_COLORS.len();

/// One coloured wall segment in arena coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub a: Vec2,
    pub b: Vec2,
    pub color: Rgba,
}

impl Wall {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba) -> Self {
        Self {
            a: vec2(x1, y1),
            b: vec2(x2, y2),
            color,
        }
    }
}

/// Scene dump line, whole arena units: `{X1:161, Y1:307, X2:274, Y2:342},`
impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{X1:{}, Y1:{}, X2:{}, Y2:{}}},",
            self.a.x as i32, self.a.y as i32, self.b.x as i32, self.b.y as i32
        )
    }
}

/// Arena bounds plus its walls.  The first [`BORDER_WALLS`] entries are the
/// border and never change; the rest are interior and replaced wholesale.
#[derive(Clone, Debug)]
pub struct Scene {
    width: f32,
    height: f32,
    walls: Vec<Wall>,
}

impl Scene {
    /// Border only.
    pub fn empty(width: f32, height: f32) -> Self {
        let walls = vec![
            Wall::new(0.0, 1.0, width, 1.0, BLUE),
            Wall::new(width, 0.0, width, height - 1.0, BLUE),
            Wall::new(width, height - 1.0, 0.0, height - 1.0, BLUE),
            Wall::new(0.0, height - 1.0, 0.0, 1.0, BLUE),
        ];
        Self {
            width,
            height,
            walls,
        }
    }

    /// Border plus the stock interior layout.
    pub fn new(width: f32, height: f32) -> Self {
        let mut scene = Self::empty(width, height);
        scene.walls.extend([
            Wall::new(161.0, 307.0, 274.0, 342.0, GREEN1),
            Wall::new(167.0, 423.0, 180.0, 331.0, GREEN2),
            Wall::new(439.0, 382.0, 437.0, 537.0, GREEN3),
            Wall::new(86.0, 246.0, 348.0, 45.0, GREEN4),
            Wall::new(432.0, 86.0, 281.0, 69.0, GREEN5),
        ]);
        scene
    }

    /// Border plus caller-supplied interior walls.
    pub fn with_interior(
        width: f32,
        height: f32,
        interior: impl IntoIterator<Item = Wall>,
    ) -> Self {
        let mut scene = Self::empty(width, height);
        scene.walls.extend(interior);
        scene
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    #[inline]
    pub fn interior(&self) -> &[Wall] {
        &self.walls[BORDER_WALLS.min(self.walls.len())..]
    }

    /// Keep the border, replace the interior with five random walls.
    ///
    /// Endpoints are whole units in `[0, width/2) × [0, height)`.
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) {
        self.walls.truncate(BORDER_WALLS);
        let half_w = (self.width / 2.0) as i32;
        let h = self.height as i32;
        for color in WALL_COLORS {
            let mut coord = |max: i32| rng.gen_range(0..max.max(1)) as f32;
            let (x1, y1, x2, y2) = (coord(half_w), coord(h), coord(half_w), coord(h));
            self.walls.push(Wall::new(x1, y1, x2, y2, color));
        }
    }

    /// Human-readable interior dump, one wall per line, then a separator.
    pub fn dump_interior(&self) -> String {
        let mut out = String::new();
        for wall in self.interior() {
            let _ = writeln!(out, "{wall}");
        }
        out.push_str("---------------\n");
        out
    }
}
