use thiserror::Error;

use crate::coords::Vec2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitmapError {
    #[error("bitmap dimensions must be non-zero, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
    #[error("bitmap {width}x{height} needs {expected} bytes of RGBA, got {actual}")]
    BufferSize { width: u32, height: u32, expected: usize, actual: usize },
}

/// A decoded raster held in memory.
///
/// Pixels are tightly packed premultiplied RGBA8, row-major, top row first.
/// The bitmap is immutable once built; widgets share it by `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    /// Builds a bitmap from straight-alpha RGBA8 bytes, premultiplying them.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> Result<Self, BitmapError> {
        check_size(width, height, rgba.len())?;
        for px in rgba.chunks_exact_mut(4) {
            let a = px[3] as u16;
            if a < 255 {
                px[0] = premul(px[0], a);
                px[1] = premul(px[1], a);
                px[2] = premul(px[2], a);
            }
        }
        Ok(Self { width, height, pixels: rgba })
    }

    /// A bitmap filled with one straight-alpha RGBA8 color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, BitmapError> {
        let len = width as usize * height as usize;
        Self::from_rgba8(width, height, rgba.repeat(len))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height as a float vector.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Premultiplied RGBA8 pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Premultiplied RGBA of a single pixel, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

fn check_size(width: u32, height: u32, actual: usize) -> Result<(), BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::ZeroSize { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if actual != expected {
        return Err(BitmapError::BufferSize { width, height, expected, actual });
    }
    Ok(())
}

#[inline]
fn premul(c: u8, a: u16) -> u8 {
    // Rounded c * a / 255.
    let v = c as u16 * a + 128;
    ((v + (v >> 8)) >> 8) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(
            Bitmap::from_rgba8(0, 4, Vec::new()),
            Err(BitmapError::ZeroSize { width: 0, height: 4 })
        );
    }

    #[test]
    fn short_buffer_is_rejected() {
        let err = Bitmap::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(err, BitmapError::BufferSize { width: 2, height: 2, expected: 16, actual: 15 });
    }

    #[test]
    fn straight_alpha_is_premultiplied() {
        let bmp = Bitmap::from_rgba8(1, 1, vec![255, 128, 0, 128]).unwrap();
        assert_eq!(bmp.pixel(0, 0), Some([128, 64, 0, 128]));
    }

    #[test]
    fn opaque_pixels_are_untouched() {
        let bmp = Bitmap::solid(3, 2, [10, 20, 30, 255]).unwrap();
        assert_eq!(bmp.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(bmp.pixel(3, 0), None);
        assert_eq!(bmp.size(), Vec2::new(3.0, 2.0));
    }
}
