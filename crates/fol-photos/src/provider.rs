//! Random image descriptors from the photo service
//!
//! Issues `GET {base}/photos/random?client_id=<token>` and extracts
//! `urls.regular` from the JSON payload. Nothing is cached: each call is a
//! fresh request.

use reqwest::header::{HeaderValue, CACHE_CONTROL};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use fol_core::{ImageDescriptor, NetworkError};

use crate::client::map_reqwest_error;

/// Default photo service endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.unsplash.com";

/// API version requested via the `Accept-Version` header
pub const DEFAULT_ACCEPT_VERSION: &str = "v1";

/// Produces one random image descriptor per call.
#[trait_variant::make(ImageProvider: Send)]
pub trait LocalImageProvider {
    /// Request a fresh random image. Fails on transport errors, non-2xx
    /// responses, and malformed payloads.
    async fn fetch_random_image(&self) -> Result<ImageDescriptor, NetworkError>;
}

/// Connection settings for the photo service
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: Url,
    pub access_token: String,
    pub accept_version: String,
}

impl ProviderConfig {
    pub fn new(base_url: Url, access_token: impl Into<String>) -> Self {
        Self {
            base_url,
            access_token: access_token.into(),
            accept_version: DEFAULT_ACCEPT_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RandomImageResponse {
    #[serde(default)]
    id: Option<String>,
    urls: ImageUrls,
}

#[derive(Debug, Deserialize)]
struct ImageUrls {
    regular: String,
}

/// Build `{base}/photos/random?client_id=<token>`, keeping any path prefix on
/// the base URL.
pub fn random_image_url(base: &Url, access_token: &str) -> Result<Url, NetworkError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| NetworkError::transport(format!("Base URL cannot be a base: {}", base)))?
        .pop_if_empty()
        .extend(["photos", "random"]);
    url.query_pairs_mut()
        .append_pair("client_id", access_token);
    Ok(url)
}

/// Decode a random-image payload into a descriptor
pub fn parse_random_image(body: &[u8]) -> Result<ImageDescriptor, NetworkError> {
    let response: RandomImageResponse = serde_json::from_slice(body)
        .map_err(|e| NetworkError::decode(format!("Invalid random image payload: {}", e)))?;

    let url = Url::parse(&response.urls.regular).map_err(|e| {
        NetworkError::decode(format!(
            "Invalid image URL '{}': {}",
            response.urls.regular, e
        ))
    })?;

    let descriptor = ImageDescriptor::new(url);
    Ok(match response.id {
        Some(id) => descriptor.with_photo_id(id),
        None => descriptor,
    })
}

/// Photo service client
#[derive(Debug, Clone)]
pub struct UnsplashProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl UnsplashProvider {
    pub fn new(client: reqwest::Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Endpoint without the token, for log lines and error messages
    fn endpoint_for_display(&self) -> String {
        let mut url = self.config.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["photos", "random"]);
        }
        url.to_string()
    }
}

impl ImageProvider for UnsplashProvider {
    async fn fetch_random_image(&self) -> Result<ImageDescriptor, NetworkError> {
        let url = random_image_url(&self.config.base_url, &self.config.access_token)?;
        let endpoint = self.endpoint_for_display();
        debug!("Requesting random image from {}", endpoint);

        let accept_version = HeaderValue::from_str(&self.config.accept_version)
            .map_err(|e| NetworkError::transport(format!("Invalid Accept-Version: {}", e)))?;

        let response = self
            .client
            .get(url)
            .header("Accept-Version", accept_version)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .send()
            .await
            .map_err(|e| map_reqwest_error(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::status(status.as_u16(), endpoint));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(e.without_url()))?;

        let descriptor = parse_random_image(&body)?;
        debug!(
            "Random image {} -> {}",
            descriptor.photo_id.as_deref().unwrap_or("<no id>"),
            descriptor.url
        );
        Ok(descriptor)
    }
}
