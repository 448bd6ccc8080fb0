pub mod collision;
pub mod input;
pub mod movement;

pub use collision::{attempt_move, path_is_clear};
pub use input::{Event, InputState, Key, MouseButton, MouseButtons};
pub use movement::apply_held_keys;
