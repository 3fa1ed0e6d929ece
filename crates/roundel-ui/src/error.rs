use std::path::PathBuf;

use roundel_mkml::ParseError;
use thiserror::Error;

use crate::content::ContentKind;

#[derive(Debug, Error)]
pub enum UiError {
    /// Image content that cannot back a circular image pattern.
    #[error("unsupported image content: expected a raster image, got {kind}")]
    UnsupportedContentKind { kind: ContentKind },

    #[error("no drawable resource named {0:?}")]
    ResourceNotFound(String),

    #[error("unknown widget {0:?}")]
    UnknownWidget(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to load image {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
