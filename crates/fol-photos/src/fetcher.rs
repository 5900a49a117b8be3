//! Image byte downloads

use bytes::Bytes;
use image::ImageFormat;
use tracing::debug;

use fol_core::{ImageBytes, ImageDescriptor, ImageKind, NetworkError};

use crate::client::map_reqwest_error;

/// Resolves a descriptor to image bytes. Stateless and safe to call
/// concurrently.
#[trait_variant::make(ImageFetcher: Send)]
pub trait LocalImageFetcher {
    async fn fetch_bytes(&self, descriptor: &ImageDescriptor) -> Result<ImageBytes, NetworkError>;
}

/// Check that a downloaded body is a non-empty image and detect its format
/// from its magic bytes.
pub fn sniff_image(url: &str, data: Bytes) -> Result<ImageBytes, NetworkError> {
    if data.is_empty() {
        return Err(NetworkError::EmptyBody {
            url: url.to_string(),
        });
    }

    let format = image::guess_format(&data).map_err(|_| NetworkError::UnsupportedImage {
        url: url.to_string(),
    })?;

    Ok(ImageBytes::new(data, image_kind(format)))
}

fn image_kind(format: ImageFormat) -> ImageKind {
    match format {
        ImageFormat::Jpeg => ImageKind::Jpeg,
        ImageFormat::Png => ImageKind::Png,
        ImageFormat::Gif => ImageKind::Gif,
        ImageFormat::WebP => ImageKind::WebP,
        _ => ImageKind::Other,
    }
}

/// Downloads image bytes over HTTP
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ImageFetcher for HttpImageFetcher {
    async fn fetch_bytes(&self, descriptor: &ImageDescriptor) -> Result<ImageBytes, NetworkError> {
        let url = descriptor.url.as_str();
        debug!("Downloading image {}", url);

        let response = self
            .client
            .get(descriptor.url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::status(status.as_u16(), url));
        }

        let data = response.bytes().await.map_err(map_reqwest_error)?;
        let image = sniff_image(url, data)?;
        debug!("Downloaded {} bytes ({:?}) from {}", image.len(), image.kind, url);
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{loopback_client, serve_once};

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_sniff_png() {
        let image = sniff_image("https://x/a.png", Bytes::from_static(PNG_HEADER)).unwrap();
        assert_eq!(image.kind, ImageKind::Png);
        assert_eq!(image.len(), PNG_HEADER.len());
    }

    #[test]
    fn test_sniff_jpeg() {
        let image = sniff_image("https://x/a.jpg", Bytes::from_static(JPEG_HEADER)).unwrap();
        assert_eq!(image.kind, ImageKind::Jpeg);
    }

    #[test]
    fn test_sniff_empty_body() {
        let err = sniff_image("https://x/a.jpg", Bytes::new()).unwrap_err();
        assert_eq!(
            err,
            NetworkError::EmptyBody {
                url: "https://x/a.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_sniff_rejects_html() {
        let err = sniff_image(
            "https://x/a.jpg",
            Bytes::from_static(b"<!doctype html><p>not found</p>"),
        )
        .unwrap_err();
        assert!(matches!(err, NetworkError::UnsupportedImage { .. }));
    }

    async fn fetch_from(status: u16, body: &[u8]) -> (Result<ImageBytes, NetworkError>, String) {
        let (base, server) = serve_once(status, body.to_vec()).await;
        let descriptor = ImageDescriptor::new(base.join("img/a.png").unwrap());

        let result = ImageFetcher::fetch_bytes(&HttpImageFetcher::new(loopback_client()), &descriptor)
            .await;
        server.await.unwrap();
        (result, descriptor.url.to_string())
    }

    #[tokio::test]
    async fn test_fetch_bytes_success() {
        let (result, _) = fetch_from(200, PNG_HEADER).await;

        let image = result.unwrap();
        assert_eq!(image.kind, ImageKind::Png);
        assert_eq!(image.data.as_ref(), PNG_HEADER);
    }

    #[tokio::test]
    async fn test_fetch_bytes_non_success_status() {
        let (result, url) = fetch_from(404, b"missing").await;
        assert_eq!(result.unwrap_err(), NetworkError::status(404, url));
    }

    #[tokio::test]
    async fn test_fetch_bytes_empty_body() {
        let (result, url) = fetch_from(200, b"").await;
        assert_eq!(result.unwrap_err(), NetworkError::EmptyBody { url });
    }

    #[tokio::test]
    async fn test_fetch_bytes_not_an_image() {
        let (result, _) = fetch_from(200, b"<!doctype html>").await;
        assert!(matches!(
            result.unwrap_err(),
            NetworkError::UnsupportedImage { .. }
        ));
    }
}
