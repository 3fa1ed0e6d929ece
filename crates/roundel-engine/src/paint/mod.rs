//! Paint model shared between UI and the rasterizer.
//!
//! Scope:
//! - color representation (premultiplied alpha), used for canvas backgrounds
//! - decoded rasters (`Bitmap`)
//! - image fills (`ImagePattern`)
//!
//! Geometry types remain in `coords`.

pub mod bitmap;
pub mod color;
pub mod pattern;

pub use bitmap::{Bitmap, BitmapError};
pub use color::Color;
pub use pattern::ImagePattern;
