pub mod fov;
pub mod geometry;
pub mod observer;
pub mod scene;

pub use fov::{Fov, FovConstants};
pub use observer::{Observer, ROTATION_STEP};
pub use scene::{BORDER_WALLS, INTERIOR_WALLS, Scene, WALL_COLORS, Wall};
