//! Coordinate and geometry types shared by the rasterizer and the UI layer.
//!
//! Canonical space:
//! - device pixels
//! - origin top-left
//! - +X right, +Y down

mod geometry;
mod transform;

pub use geometry::{Rect, Vec2};
pub use transform::Transform;
