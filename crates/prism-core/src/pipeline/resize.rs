//! Fixed-size resize with a silent failure sentinel.
//!
//! The resize path's failure contract differs from the info path's on
//! purpose: instead of an explicit error object, an unfetchable or
//! undecodable source yields a single-element zero array with channel count
//! 0. The two contracts are not unified.

use image::imageops::FilterType;
use image::DynamicImage;

use super::fetch::FetchedImage;
use crate::config::ResizeConfig;
use crate::error::FetchError;
use crate::types::{PixelArray, ResizedImage};

/// Number of color channels after RGB normalization.
const CHANNELS: usize = 3;

/// Resizes images to a fixed target, yielding row-major pixel planes.
#[derive(Debug, Clone, Copy)]
pub struct ImageResizer {
    width: u32,
    height: u32,
}

impl ImageResizer {
    pub fn new(config: &ResizeConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }

    /// Target (width, height) in pixels.
    pub fn target(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize to the target dimensions.
    ///
    /// Output shape is (height, width, 3): pixels are converted to RGB so the
    /// channel count is uniform across successful resizes. Resampling is
    /// Lanczos3, applied uniformly to every image.
    pub fn resize(&self, image: &DynamicImage) -> ResizedImage {
        let resized = image.resize_exact(self.width, self.height, FilterType::Lanczos3);
        let rgb = resized.to_rgb8();

        let row_len = self.width as usize * CHANNELS;
        let rows = rgb
            .as_raw()
            .chunks_exact(row_len)
            .map(|row| row.chunks_exact(CHANNELS).map(<[u8]>::to_vec).collect())
            .collect();

        ResizedImage {
            pixels: PixelArray::Planes(rows),
            channels: CHANNELS as u32,
        }
    }

    /// Fold a fetch outcome into the resize path's contract.
    ///
    /// Failures become the sentinel (single zero element, channel count 0),
    /// never an error.
    pub fn from_fetch(&self, fetched: Result<FetchedImage, FetchError>) -> ResizedImage {
        match fetched {
            Ok(f) => self.resize(&f.image),
            Err(e) => {
                tracing::debug!("resize source unavailable: {e}");
                ResizedImage::sentinel()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn resizer(width: u32, height: u32) -> ImageResizer {
        ImageResizer::new(&ResizeConfig { width, height })
    }

    #[test]
    fn test_resize_output_shape() {
        // 80x80 source resized down to the 64x64 target.
        let img = DynamicImage::ImageRgb8(RgbImage::new(80, 80));
        let resized = resizer(64, 64).resize(&img);

        assert_eq!(resized.channels, 3);
        match resized.pixels {
            PixelArray::Planes(rows) => {
                assert_eq!(rows.len(), 64);
                assert_eq!(rows[0].len(), 64);
                assert_eq!(rows[0][0].len(), 3);
            }
            PixelArray::Sentinel(_) => panic!("expected pixel planes"),
        }
    }

    #[test]
    fn test_resize_black_image_is_all_zeros() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(32, 32));
        let resized = resizer(16, 16).resize(&img);

        match resized.pixels {
            PixelArray::Planes(rows) => {
                assert!(rows
                    .iter()
                    .flatten()
                    .flatten()
                    .all(|&channel| channel == 0));
            }
            PixelArray::Sentinel(_) => panic!("expected pixel planes"),
        }
    }

    #[test]
    fn test_resize_upscales_to_target() {
        // Smaller source than target: resize_exact still yields the target shape.
        let img = DynamicImage::ImageRgb8(RgbImage::new(8, 8));
        let resized = resizer(64, 32).resize(&img);

        match resized.pixels {
            PixelArray::Planes(rows) => {
                assert_eq!(rows.len(), 32);
                assert_eq!(rows[0].len(), 64);
            }
            PixelArray::Sentinel(_) => panic!("expected pixel planes"),
        }
    }

    #[test]
    fn test_from_fetch_failure_is_sentinel() {
        let err = FetchError::RequestFailed {
            url: "u0".into(),
            message: "HTTP 404".into(),
        };
        let resized = resizer(64, 64).from_fetch(Err(err));

        assert!(resized.is_sentinel());
        assert_eq!(resized.channels, 0);
        assert_eq!(resized.pixels, PixelArray::Sentinel(vec![0]));
    }

    #[test]
    fn test_from_fetch_success_resizes() {
        let fetched = FetchedImage {
            image: DynamicImage::new_rgb8(80, 80),
            format: ImageFormat::Gif,
            byte_len: 100,
        };
        let resized = resizer(64, 64).from_fetch(Ok(fetched));

        assert!(!resized.is_sentinel());
        assert_eq!(resized.channels, 3);
    }
}
