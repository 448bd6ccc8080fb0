pub mod controller;
pub mod raycast;

pub use controller::{BACKGROUND, Controller};
pub use raycast::{ClosestHit, RayCaster};
