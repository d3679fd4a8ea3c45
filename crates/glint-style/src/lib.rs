#![forbid(unsafe_code)]

//! Style primitives for glint: opaque RGB colors and precomputed gradients.

pub mod color;
pub mod gradient;

pub use color::Rgb;
pub use gradient::{FADE_FLOOR, Gradient};
