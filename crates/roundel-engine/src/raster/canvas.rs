use std::path::Path;

use thiserror::Error;
use tiny_skia::{FillRule, FilterQuality, IntSize, PathBuilder, Pattern, Pixmap, SpreadMode};

use crate::coords::{Transform, Vec2};
use crate::paint::{Bitmap, Color, ImagePattern};
use crate::scene::DrawCmd;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("cannot allocate a {width}x{height} canvas")]
    InvalidSize { width: u32, height: u32 },
    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// An RGBA8 (premultiplied) render target.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    /// Fills every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(to_skia_color(color));
    }

    /// Premultiplied RGBA of one pixel, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?;
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Executes `commands` in order.
    ///
    /// Degenerate commands (non-positive radius, non-finite geometry) are skipped.
    pub fn draw(&mut self, commands: &[DrawCmd]) {
        for cmd in commands {
            match cmd {
                DrawCmd::Circle { center, radius, fill } => {
                    fill_circle(&mut self.pixmap, *center, *radius, fill)
                }
            }
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        self.pixmap.encode_png().map_err(|e| RasterError::Encode(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        self.pixmap.save_png(path).map_err(|e| RasterError::Encode(e.to_string()))
    }
}

fn fill_circle(pixmap: &mut Pixmap, center: Vec2, radius: f32, fill: &ImagePattern) {
    if !(radius > 0.0) || !center.is_finite() || !fill.transform.is_finite() {
        return;
    }
    let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
        log::warn!("circle path rejected: center={center:?} radius={radius}");
        return;
    };
    let Some(source) = to_pixmap(&fill.bitmap) else {
        log::warn!("pattern bitmap {:?} could not be uploaded", fill.bitmap);
        return;
    };

    let mut paint = tiny_skia::Paint::default();
    paint.shader = Pattern::new(
        source.as_ref(),
        SpreadMode::Pad,
        FilterQuality::Bilinear,
        1.0,
        to_skia_transform(fill.transform),
    );
    paint.anti_alias = fill.anti_alias;
    pixmap.fill_path(&path, &paint, FillRule::Winding, tiny_skia::Transform::identity(), None);
}

fn to_pixmap(bitmap: &Bitmap) -> Option<Pixmap> {
    let size = IntSize::from_wh(bitmap.width(), bitmap.height())?;
    Pixmap::from_vec(bitmap.pixels().to_vec(), size)
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let (r, g, b, a) = color.to_straight();
    tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn to_skia_transform(t: Transform) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(t.sx, t.ky, t.kx, t.sy, t.tx, t.ty)
}
