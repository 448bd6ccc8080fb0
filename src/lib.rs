//! 2.5D ray-casting arena viewer.
//!
//! The left half of the canvas is a top-down arena of coloured wall segments;
//! the right half is the observer's view, one shaded column per ray.

pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
