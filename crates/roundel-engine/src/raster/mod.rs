//! CPU rasterizer executing a [`DrawList`](crate::scene::DrawList) into an
//! RGBA8 canvas.
//!
//! Backed by `tiny-skia`. Image fills become pattern shaders sampled through
//! the fill's transform, clamped at the bitmap edge and filtered bilinearly.

mod canvas;

pub use canvas::{Canvas, RasterError};
