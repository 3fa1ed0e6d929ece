use std::fmt;
use std::path::Path;
use std::sync::Arc;

use roundel_engine::coords::Vec2;
use roundel_engine::paint::Bitmap;

use crate::error::UiError;

/// A vector image. Only its intrinsic size is known to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorImage {
    pub size: Vec2,
}

/// Image content assigned to an image view.
#[derive(Debug, Clone, Default)]
pub enum ImageContent {
    #[default]
    Absent,
    /// A decoded raster, shared with whoever else holds it.
    Raster(Arc<Bitmap>),
    Vector(VectorImage),
}

/// Discriminant of [`ImageContent`], for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Absent,
    Raster,
    Vector,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentKind::Absent => "no content",
            ContentKind::Raster => "raster image",
            ContentKind::Vector => "vector image",
        })
    }
}

impl From<Bitmap> for ImageContent {
    fn from(bitmap: Bitmap) -> Self {
        ImageContent::Raster(Arc::new(bitmap))
    }
}

impl From<Arc<Bitmap>> for ImageContent {
    fn from(bitmap: Arc<Bitmap>) -> Self {
        ImageContent::Raster(bitmap)
    }
}

impl ImageContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            ImageContent::Absent => ContentKind::Absent,
            ImageContent::Raster(_) => ContentKind::Raster,
            ImageContent::Vector(_) => ContentKind::Vector,
        }
    }

    /// Natural size of the content; zero when absent.
    pub fn intrinsic_size(&self) -> Vec2 {
        match self {
            ImageContent::Absent => Vec2::zero(),
            ImageContent::Raster(bitmap) => bitmap.size(),
            ImageContent::Vector(vector) => vector.size,
        }
    }

    /// Loads an image file.
    ///
    /// `.svg` files become [`ImageContent::Vector`] (size only); anything
    /// else is decoded to a raster.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UiError> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

        let content = if is_svg { load_svg(path) } else { load_raster(path) };
        let content = content.map_err(|source| UiError::Load { path: path.to_path_buf(), source })?;

        let size = content.intrinsic_size();
        log::debug!("loaded {} {}x{} from {}", content.kind(), size.x, size.y, path.display());
        Ok(content)
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn load_raster(path: &Path) -> Result<ImageContent, BoxError> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let bitmap = Bitmap::from_rgba8(width, height, rgba.into_raw())?;
    Ok(bitmap.into())
}

fn load_svg(path: &Path) -> Result<ImageContent, BoxError> {
    use resvg::usvg;

    let data = std::fs::read(path)?;
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())?;
    let size = tree.size();
    Ok(ImageContent::Vector(VectorImage { size: Vec2::new(size.width(), size.height()) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsic_size_per_kind() {
        assert_eq!(ImageContent::Absent.intrinsic_size(), Vec2::zero());

        let raster: ImageContent = Bitmap::solid(30, 10, [0, 0, 0, 255]).unwrap().into();
        assert_eq!(raster.kind(), ContentKind::Raster);
        assert_eq!(raster.intrinsic_size(), Vec2::new(30.0, 10.0));

        let vector = ImageContent::Vector(VectorImage { size: Vec2::new(24.0, 24.0) });
        assert_eq!(vector.kind(), ContentKind::Vector);
        assert_eq!(vector.intrinsic_size(), Vec2::new(24.0, 24.0));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = ImageContent::load("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, UiError::Load { .. }));
        assert!(err.to_string().contains("here.png"));
    }

    #[test]
    fn svg_loads_as_vector() {
        let path = std::env::temp_dir().join(format!("roundel-content-{}.svg", std::process::id()));
        std::fs::write(
            &path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="32"><rect width="48" height="32"/></svg>"#,
        )
        .unwrap();
        let content = ImageContent::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(content.kind(), ContentKind::Vector);
        assert_eq!(content.intrinsic_size(), Vec2::new(48.0, 32.0));
    }

    #[test]
    fn png_loads_as_raster() {
        let path = std::env::temp_dir().join(format!("roundel-content-{}.png", std::process::id()));
        image::RgbaImage::from_pixel(5, 3, image::Rgba([9, 8, 7, 255])).save(&path).unwrap();
        let content = ImageContent::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let ImageContent::Raster(bitmap) = content else { panic!("expected raster") };
        assert_eq!((bitmap.width(), bitmap.height()), (5, 3));
        assert_eq!(bitmap.pixel(4, 2), Some([9, 8, 7, 255]));
    }
}
