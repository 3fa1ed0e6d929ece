use std::sync::Arc;

use crate::coords::{Transform, Vec2};

use super::Bitmap;

/// A bitmap used as a fill, sampled through `transform`.
///
/// `transform` maps bitmap space to drawing space. Sampling outside the
/// bitmap clamps to its edge pixels, and scaled texels are filtered
/// bilinearly.
///
/// `dither` is carried for targets with fewer than 8 bits per channel. The
/// RGBA8 canvas ignores it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePattern {
    pub bitmap: Arc<Bitmap>,
    pub transform: Transform,
    pub anti_alias: bool,
    pub dither: bool,
}

impl ImagePattern {
    /// Pattern with anti-aliasing and dithering enabled.
    pub fn new(bitmap: Arc<Bitmap>, transform: Transform) -> Self {
        Self { bitmap, transform, anti_alias: true, dither: true }
    }

    /// Same pattern shifted by `offset` in drawing space.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self { transform: self.transform.post_translate(offset.x, offset.y), ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translated_moves_only_the_offset() {
        let bmp = Arc::new(Bitmap::solid(2, 2, [0, 0, 0, 255]).unwrap());
        let p = ImagePattern::new(bmp, Transform::from_scale(2.0, 2.0));
        let moved = p.translated(Vec2::new(10.0, 20.0));
        assert_eq!(moved.transform.sx, 2.0);
        assert_eq!(moved.transform.tx, 10.0);
        assert_eq!(moved.transform.ty, 20.0);
        assert!(Arc::ptr_eq(&p.bitmap, &moved.bitmap));
    }

    #[test]
    fn new_enables_smoothing_flags() {
        let bmp = Arc::new(Bitmap::solid(1, 1, [0, 0, 0, 255]).unwrap());
        let p = ImagePattern::new(bmp, Transform::identity());
        assert!(p.anti_alias && p.dither);
    }
}
