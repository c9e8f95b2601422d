//! Image fetching: bounded-timeout HTTP download plus decode.

use std::io::Cursor;
use std::time::Duration;

use image::{DynamicImage, ImageFormat};

use crate::config::FetchConfig;
use crate::error::FetchError;

/// Downloads and decodes one image per call.
///
/// The `reqwest::Client` is injected and shared read-only across concurrent
/// tasks; cloning the fetcher is cheap (the client is reference-counted).
#[derive(Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

/// Result of one successful fetch: the decoded handle plus wire metadata.
///
/// Consumers take this by value; the decoded pixel buffer is released when
/// the value is dropped, on every path.
#[derive(Debug)]
pub struct FetchedImage {
    /// The decoded image data
    pub image: DynamicImage,

    /// Detected image format
    pub format: ImageFormat,

    /// Raw byte length of the downloaded payload
    pub byte_len: u64,
}

impl ImageFetcher {
    /// Create a fetcher over a shared client with the configured timeout.
    pub fn new(client: reqwest::Client, config: &FetchConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Download `url` and decode the body as an image.
    ///
    /// A single attempt with a bounded timeout; the caller receives exactly
    /// one terminal outcome per invocation. Decode runs on the blocking pool
    /// to keep CPU work off the async runtime.
    pub async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::RequestFailed {
                url: url.to_string(),
                message: format!("HTTP {status}"),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.classify(url, e))?
            .to_vec();
        if bytes.is_empty() {
            return Err(FetchError::RequestFailed {
                url: url.to_string(),
                message: "empty response body".to_string(),
            });
        }

        let url_owned = url.to_string();
        tokio::task::spawn_blocking(move || decode_bytes(bytes, &url_owned))
            .await
            .map_err(|e| FetchError::DecodeFailed {
                url: url.to_string(),
                message: format!("task join error: {e}"),
            })?
    }

    /// Map a transport error onto the fetch taxonomy.
    fn classify(&self, url: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            FetchError::RequestFailed {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Synchronous decode from bytes (runs in spawn_blocking).
fn decode_bytes(bytes: Vec<u8>, url: &str) -> Result<FetchedImage, FetchError> {
    let byte_len = bytes.len() as u64;
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| FetchError::DecodeFailed {
            url: url.to_string(),
            message: format!("cannot detect image format: {e}"),
        })?;
    let format = reader.format().ok_or_else(|| FetchError::DecodeFailed {
        url: url.to_string(),
        message: "unknown image format".to_string(),
    })?;
    let image = reader.decode().map_err(|e| FetchError::DecodeFailed {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(FetchedImage {
        image,
        format,
        byte_len,
    })
}

/// The decoder's format tag, as surfaced in info results.
pub fn format_tag(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Png => "PNG",
        ImageFormat::WebP => "WEBP",
        ImageFormat::Gif => "GIF",
        ImageFormat::Tiff => "TIFF",
        ImageFormat::Bmp => "BMP",
        ImageFormat::Ico => "ICO",
        ImageFormat::Pnm => "PNM",
        ImageFormat::Avif => "AVIF",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gif_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Gif).unwrap();
        buf.into_inner()
    }

    fn fetcher(timeout_ms: u64) -> ImageFetcher {
        ImageFetcher::new(
            reqwest::Client::new(),
            &FetchConfig {
                timeout_ms,
                ..FetchConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn test_fetch_decodes_valid_gif() {
        let server = MockServer::start().await;
        let body = gif_bytes(64, 64);
        Mock::given(method("GET"))
            .and(path("/blank.gif"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let url = format!("{}/blank.gif", server.uri());
        let fetched = fetcher(5000).fetch(&url).await.unwrap();

        assert_eq!(fetched.image.dimensions(), (64, 64));
        assert_eq!(fetched.format, ImageFormat::Gif);
        assert_eq!(fetched.byte_len, body.len() as u64);
    }

    #[tokio::test]
    async fn test_fetch_404_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.gif"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing.gif", server.uri());
        let err = fetcher(5000).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::RequestFailed { .. }));
    }

    #[tokio::test]
    async fn test_fetch_empty_body_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty.gif"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(Vec::new()))
            .mount(&server)
            .await;

        let url = format!("{}/empty.gif", server.uri());
        let err = fetcher(5000).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::RequestFailed { .. }));
    }

    #[tokio::test]
    async fn test_fetch_corrupt_bytes_is_decode_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/garbage.gif"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not an image".to_vec()))
            .mount(&server)
            .await;

        let url = format!("{}/garbage.gif", server.uri());
        let err = fetcher(5000).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::DecodeFailed { .. }));
    }

    #[tokio::test]
    async fn test_fetch_slow_server_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow.gif"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(gif_bytes(8, 8))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let url = format!("{}/slow.gif", server.uri());
        let err = fetcher(50).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_request_failed() {
        // Nothing listens on this port; connection is refused immediately.
        let err = fetcher(5000)
            .fetch("http://127.0.0.1:1/nope.gif")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::RequestFailed { .. }));
    }

    #[test]
    fn test_format_tag() {
        assert_eq!(format_tag(ImageFormat::Gif), "GIF");
        assert_eq!(format_tag(ImageFormat::Png), "PNG");
        assert_eq!(format_tag(ImageFormat::Jpeg), "JPEG");
    }

    #[test]
    fn test_format_detected_by_content_not_extension() {
        // PNG bytes behind a .gif URL must still decode as PNG.
        let img = DynamicImage::new_rgb8(4, 4);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();

        let fetched = decode_bytes(buf.into_inner(), "https://host/misnamed.gif").unwrap();
        assert_eq!(fetched.format, ImageFormat::Png);
    }
}
