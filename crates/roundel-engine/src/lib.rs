//! Roundel engine crate.
//!
//! Geometry, the paint model, the renderer-agnostic draw stream and the CPU
//! rasterizer that executes it.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod scene;
