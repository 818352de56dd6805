use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::foundation::error::{LockshotError, LockshotResult};

/// Raw bytes of a fetched resource plus its declared content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedAsset {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Retrieves resource bytes by absolute URL.
///
/// Non-success responses must fail with [`LockshotError::ResourceFetch`].
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> LockshotResult<FetchedAsset>;
}

/// Fetches `http(s)` URLs over the network and `file:` URLs from disk.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Fetcher without a request timeout.
    pub fn new() -> LockshotResult<Self> {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> LockshotResult<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| LockshotError::validation(format!("build http client: {e}")))?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &Url) -> LockshotResult<FetchedAsset> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LockshotError::resource_fetch(format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LockshotError::resource_fetch(format!(
                "GET {url}: HTTP {status}"
            )));
        }
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| LockshotError::resource_fetch(format!("read body of {url}: {e}")))?;
        Ok(FetchedAsset {
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    async fn fetch_file(&self, url: &Url) -> LockshotResult<FetchedAsset> {
        let path = url
            .to_file_path()
            .map_err(|()| LockshotError::resource_fetch(format!("not a local path: {url}")))?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| LockshotError::resource_fetch(format!("read {}: {e}", path.display())))?;
        Ok(FetchedAsset {
            content_type: guess_content_type(&path).map(str::to_string),
            bytes,
        })
    }
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> LockshotResult<FetchedAsset> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url).await,
            "file" => self.fetch_file(url).await,
            other => Err(LockshotError::resource_fetch(format!(
                "unsupported scheme `{other}` in {url}"
            ))),
        }
    }
}

/// Content type from a file extension.
pub fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let ct = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "css" => "text/css",
        "json" => "application/json",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => return None,
    };
    Some(ct)
}
