//! Metadata extraction from fetched images.

use image::GenericImageView;

use super::fetch::{format_tag, FetchedImage};
use crate::error::FetchError;
use crate::types::{ImageInfo, ImageInfoResult};

/// Derives wire metadata from a fetched image.
pub struct ImageInfoExtractor;

impl ImageInfoExtractor {
    /// Extract `{image_size, image_dimension, image_format}`.
    ///
    /// Pure function of its input. Consumes the fetched image; the decoded
    /// pixel buffer is released when this returns.
    pub fn extract(fetched: FetchedImage) -> ImageInfo {
        let (width, height) = fetched.image.dimensions();
        ImageInfo {
            image_size: fetched.byte_len,
            image_dimension: (width, height),
            image_format: format_tag(fetched.format).to_string(),
        }
    }

    /// Fold a fetch outcome into the info path's per-image result shape.
    ///
    /// Failures become the explicit error object; this path never uses the
    /// resize sentinel.
    pub fn to_result(url: &str, fetched: Result<FetchedImage, FetchError>) -> ImageInfoResult {
        match fetched {
            Ok(f) => ImageInfoResult::success(url, Self::extract(f)),
            Err(e) => {
                tracing::debug!("info extraction failed: {e}");
                ImageInfoResult::failure(url, e.user_message())
            }
        }
    }
}
