//! Roundel UI: a small retained widget host on top of `roundel-engine`, and
//! the [`CircleImageView`](widgets::circle_image::CircleImageView) widget.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use roundel_ui::prelude::*;
//!
//! let ctx = Context::new();
//! let mut view = CircleImageView::new(&ctx);
//! view.set_image_bitmap(Arc::new(bitmap));
//!
//! let mut scene = UiScene::new();
//! let draw_list = scene.frame(&mut view, Constraints::loose(Vec2::new(300.0, 200.0)))?;
//!
//! let mut canvas = Canvas::new(200, 200)?;
//! canvas.draw(draw_list);
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`Widget`](widget::Widget): `measure` resolves a size against
//! the parent's [`Constraints`](constraints::Constraints), `paint` records
//! draw commands into the [`Painter`](painter::Painter).

pub mod attrs;
pub mod constraints;
pub mod content;
pub mod context;
pub mod dsl;
pub mod error;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

/// Everything needed to host and configure widgets.
pub mod prelude {
    pub use crate::attrs::{AttributeSet, StyledAttributes};
    pub use crate::constraints::Constraints;
    pub use crate::content::{ContentKind, ImageContent, VectorImage};
    pub use crate::context::{Context, DisplayMetrics};
    pub use crate::dsl::DslLoader;
    pub use crate::error::UiError;
    pub use crate::painter::Painter;
    pub use crate::scene::UiScene;
    pub use crate::widget::Widget;
    pub use crate::widgets::circle_image::CircleImageView;

    pub use roundel_engine::coords::{Rect, Transform, Vec2};
    pub use roundel_engine::paint::{Bitmap, Color, ImagePattern};
    pub use roundel_engine::raster::Canvas;
}
