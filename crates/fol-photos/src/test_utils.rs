//! Test utilities: scripted providers and fetchers, plus a one-shot local
//! HTTP server for exercising the real clients
//!
//! Enabled for downstream crates through the `test-helpers` feature.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use url::Url;

use fol_core::{ImageBytes, ImageDescriptor, ImageKind, NetworkError};

use crate::fetcher::ImageFetcher;
use crate::provider::ImageProvider;

/// Creates a descriptor pointing at `https://images.test/<name>.jpg`.
pub fn test_descriptor(name: &str) -> ImageDescriptor {
    let url = Url::parse(&format!("https://images.test/{}.jpg", name))
        .expect("test descriptor URL is valid");
    ImageDescriptor::new(url).with_photo_id(name)
}

/// Holds provider calls until permits are released.
#[derive(Debug, Clone)]
pub struct ProviderGate(Arc<Semaphore>);

impl ProviderGate {
    /// Let `calls` pending or future provider calls proceed
    pub fn release(&self, calls: usize) {
        self.0.add_permits(calls);
    }
}

/// Provider that replays scripted results, then generates fresh descriptors
/// (`photo-1`, `photo-2`, ...).
#[derive(Debug, Default)]
pub struct StubProvider {
    responses: Mutex<VecDeque<Result<ImageDescriptor, NetworkError>>>,
    calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(
        responses: impl IntoIterator<Item = Result<ImageDescriptor, NetworkError>>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Make every call wait for a permit from the returned gate
    pub fn gated(mut self) -> (Self, ProviderGate) {
        let semaphore = Arc::new(Semaphore::new(0));
        self.gate = Some(semaphore.clone());
        (self, ProviderGate(semaphore))
    }

    /// Number of calls that have completed
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> Result<ImageDescriptor, NetworkError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let scripted = self
            .responses
            .lock()
            .map(|mut queue| queue.pop_front())
            .unwrap_or(None);
        scripted.unwrap_or_else(|| Ok(test_descriptor(&format!("photo-{}", call))))
    }
}

impl ImageProvider for StubProvider {
    async fn fetch_random_image(&self) -> Result<ImageDescriptor, NetworkError> {
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|_| NetworkError::transport("gate closed"))?
                .forget();
        }
        self.next_response()
    }
}

/// Fetcher that returns the URL text as JPEG-tagged bytes, or an empty-body
/// error for URLs marked as failing.
#[derive(Debug, Default)]
pub struct StubFetcher {
    failing: HashSet<String>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(mut self, url: &Url) -> Self {
        self.failing.insert(url.to_string());
        self
    }
}

impl ImageFetcher for StubFetcher {
    async fn fetch_bytes(&self, descriptor: &ImageDescriptor) -> Result<ImageBytes, NetworkError> {
        let url = descriptor.url.to_string();
        if self.failing.contains(&url) {
            return Err(NetworkError::EmptyBody { url });
        }
        Ok(ImageBytes::new(url.into_bytes(), ImageKind::Jpeg))
    }
}

/// Serve exactly one HTTP/1.1 response on a loopback port.
///
/// Returns the server's base URL and a handle resolving to the raw request
/// head (request line and headers) that was received.
pub async fn serve_once(status: u16, body: impl Into<Vec<u8>>) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    let body = body.into();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept connection");

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.expect("read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let reason = if status == 200 { "OK" } else { "Error" };
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            reason,
            body.len()
        );
        stream.write_all(head.as_bytes()).await.expect("write head");
        stream.write_all(&body).await.expect("write body");
        let _ = stream.shutdown().await;

        String::from_utf8_lossy(&request).into_owned()
    });

    let base = Url::parse(&format!("http://{}/", addr)).expect("listener URL");
    (base, handle)
}

/// HTTP client for loopback tests; ignores any proxy set in the environment
pub fn loopback_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build loopback client")
}
