//! Shared HTTP client construction

use std::time::Duration;

use fol_core::NetworkError;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("find-or-lose/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by the provider and the fetcher.
///
/// reqwest keeps no response cache, so every random-image request reaches
/// the service.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, NetworkError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| NetworkError::transport(format!("Failed to build HTTP client: {}", e)))
}

/// Map a reqwest failure onto the network error taxonomy
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> NetworkError {
    if err.is_decode() {
        return NetworkError::decode(err.to_string());
    }
    if let Some(status) = err.status() {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        return NetworkError::status(status.as_u16(), url);
    }
    NetworkError::transport(err.to_string())
}
