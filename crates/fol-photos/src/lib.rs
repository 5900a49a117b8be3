//! fol-photos - Photo service access and round assembly for Find or Lose
//!
//! External collaborators of the game session: a client for the random-photo
//! endpoint, an image byte downloader, and the [`RoundBuilder`] that combines
//! them into a shuffled four-image [`fol_core::Round`].

pub mod builder;
pub mod client;
pub mod fetcher;
pub mod provider;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use builder::RoundBuilder;
pub use client::{build_http_client, DEFAULT_REQUEST_TIMEOUT, USER_AGENT};
pub use fetcher::{sniff_image, HttpImageFetcher, ImageFetcher, LocalImageFetcher};
pub use provider::{
    parse_random_image, random_image_url, ImageProvider, LocalImageProvider, ProviderConfig,
    UnsplashProvider, DEFAULT_ACCEPT_VERSION, DEFAULT_API_BASE_URL,
};
