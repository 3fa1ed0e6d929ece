//! Renderer-agnostic draw stream.
//!
//! A paint pass appends commands in the order they should hit the canvas;
//! [`Canvas::draw`](crate::raster::Canvas::draw) replays them front to back.

use crate::coords::Vec2;
use crate::paint::ImagePattern;

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Disc of `radius` around `center`, filled with `fill`.
    Circle { center: Vec2, radius: f32, fill: ImagePattern },
}

/// Commands recorded by one paint pass, in paint order.
pub type DrawList = Vec<DrawCmd>;
