use crate::error::KloutError;
use crate::model::KloutIdentity;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const TIMEOUT_SEC: u64 = 10;

/// Status and body of a completed GET.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Performs a single GET and hands back the raw response.
///
/// Implementations report failures to obtain a response at all (connection refused, timeout)
/// as errors. Any response the server did send, whatever its status, is returned as is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawResponse, KloutError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, KloutError> {
        Self::with_timeout(Duration::from_secs(TIMEOUT_SEC))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, KloutError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    /// Wrap an existing connection pool.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, KloutError> {
        log::debug!("GET {}", url.path());
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// Fetch `url` and decode the body as `T`. Anything but a 200 is an error.
pub async fn fetch<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &Url,
) -> Result<T, KloutError> {
    let response = transport.get(url).await?;
    if response.status != StatusCode::OK {
        log::debug!("{} answered {}", url.path(), response.status);
        return Err(KloutError::BadResponse {
            status: response.status,
            body: response.body,
        });
    }
    decode(&response.body)
}

pub async fn fetch_identity(
    transport: &dyn Transport,
    url: &Url,
) -> Result<KloutIdentity, KloutError> {
    let identity = fetch::<KloutIdentity>(transport, url).await?;
    if identity.id.is_empty() {
        return Err(KloutError::EmptyIdentity);
    }
    Ok(identity)
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, KloutError> {
    serde_json::from_str::<T>(text).map_err(|source| {
        let message = match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => {
                let pretty = serde_json::to_string_pretty(&value).unwrap_or_default();
                format!("{source}\nContents:\n{pretty}")
            }
            Err(_) => format!("Invalid JSON: {source}"),
        };
        KloutError::DecodeError { message, source }
    })
}
