//! Core data types for the Prism pipeline.
//!
//! These types define the wire shapes of the pipeline's inputs and outputs:
//! input records, per-image info results, resized pixel payloads, and batches.

use serde::{Deserialize, Serialize};

/// One input row: an image id and its source URL.
///
/// Ids are not required to be unique by the pipeline itself, but they key the
/// result mapping; with duplicates the last observed result wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    pub url: String,
}

impl ImageRecord {
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}

/// Metadata extracted from one successfully fetched image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Raw byte length of the downloaded payload (not a re-encoded size)
    pub image_size: u64,

    /// (width, height) in pixels as reported by the decoder
    pub image_dimension: (u32, u32),

    /// Decoder's detected format tag ("GIF", "PNG", ...)
    pub image_format: String,
}

/// Per-image outcome of the info path.
///
/// Exactly one of the two shapes appears on the wire: metadata on success, or
/// an `error` string with `image_info` pinned to `""` on failure, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageInfoResult {
    Success {
        url: String,
        image_info: ImageInfo,
    },
    Failure {
        url: String,
        image_info: String,
        error: String,
    },
}

impl ImageInfoResult {
    pub fn success(url: impl Into<String>, image_info: ImageInfo) -> Self {
        Self::Success {
            url: url.into(),
            image_info,
        }
    }

    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failure {
            url: url.into(),
            image_info: String::new(),
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }
}

/// Pixel payload of one resized image.
///
/// Serializes untagged so the wire shape is the bare nested array: real pixel
/// data as (height, width, channel) planes, or the single-element zero array
/// when the source image could not be fetched or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PixelArray {
    /// Row-major (height, width, channel) pixel planes
    Planes(Vec<Vec<Vec<u8>>>),

    /// Failure sentinel: a single zero element, paired with channel count 0
    Sentinel(Vec<u8>),
}

impl PixelArray {
    pub fn sentinel() -> Self {
        Self::Sentinel(vec![0])
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel(_))
    }
}

/// A resized image plus its channel count.
///
/// The sentinel value (zero array, channel count 0) means "present but
/// invalid"; downstream consumers must not treat it as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizedImage {
    pub pixels: PixelArray,
    pub channels: u32,
}

impl ResizedImage {
    /// The documented failure signal for the resize path.
    pub fn sentinel() -> Self {
        Self {
            pixels: PixelArray::sentinel(),
            channels: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.pixels.is_sentinel()
    }
}

/// A fixed-size group of resized images published as one queue message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Shape descriptor formatted as "(N, C, X, Y)": batch size, channel
    /// count, target width, target height
    pub batch_dimension: String,

    /// Pixel payloads in arrival order
    pub images: Vec<PixelArray>,
}
