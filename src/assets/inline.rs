//! Resource inlining: turns resource references into self-contained data URLs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use url::Url;

use crate::assets::data_url::{encode_data_url, is_data_url};
use crate::assets::fetch::AssetFetcher;
use crate::foundation::error::{LockshotError, LockshotResult};

/// An embedded resource: its absolute identity and the data URL standing in for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedResource {
    pub identity: String,
    pub data_url: String,
}

type PendingEmbed = Shared<BoxFuture<'static, Result<String, String>>>;

/// Embeds resources as data URLs, caching one operation per absolute URL.
///
/// The in-flight operation is cached before it resolves, so concurrent embeds of the same
/// URL join a single fetch. Failures stay cached like successes; nothing is evicted for the
/// lifetime of the inliner. Clones share the cache.
#[derive(Clone)]
pub struct ResourceInliner {
    inner: Arc<InlinerInner>,
}

struct InlinerInner {
    base: Url,
    fetcher: Arc<dyn AssetFetcher>,
    cache: Mutex<HashMap<String, PendingEmbed>>,
}

impl ResourceInliner {
    /// `base` is the document location relative references resolve against.
    pub fn new(base: Url, fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self {
            inner: Arc::new(InlinerInner {
                base,
                fetcher,
                cache: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// Absolute URL of `reference`.
    pub fn resolve(&self, reference: &str) -> LockshotResult<Url> {
        self.inner.base.join(reference.trim()).map_err(|e| {
            LockshotError::resource_fetch(format!("cannot resolve `{reference}`: {e}"))
        })
    }

    /// Number of distinct URLs with a cached (pending or settled) operation.
    pub fn cached_len(&self) -> usize {
        self.inner
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Embed `reference`. `data:` references come back unchanged.
    pub async fn embed(&self, reference: &str) -> LockshotResult<EmbeddedResource> {
        if is_data_url(reference) {
            return Ok(EmbeddedResource {
                identity: reference.to_string(),
                data_url: reference.to_string(),
            });
        }

        let url = self.resolve(reference)?;
        let identity = url.to_string();
        let pending = {
            let mut cache = self
                .inner
                .cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            cache
                .entry(identity.clone())
                .or_insert_with(|| {
                    tracing::debug!(url = %identity, "fetching resource");
                    let fetcher = Arc::clone(&self.inner.fetcher);
                    async move { fetch_data_url(fetcher.as_ref(), &url).await }
                        .boxed()
                        .shared()
                })
                .clone()
        };

        match pending.await {
            Ok(data_url) => Ok(EmbeddedResource { identity, data_url }),
            Err(msg) => Err(LockshotError::resource_fetch(msg)),
        }
    }
}

async fn fetch_data_url(fetcher: &dyn AssetFetcher, url: &Url) -> Result<String, String> {
    match fetcher.fetch(url).await {
        Ok(asset) => Ok(encode_data_url(asset.content_type.as_deref(), &asset.bytes)),
        Err(LockshotError::ResourceFetch(msg)) => Err(msg),
        Err(other) => Err(other.to_string()),
    }
}

impl std::fmt::Debug for ResourceInliner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceInliner")
            .field("base", &self.inner.base.as_str())
            .field("cached", &self.cached_len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/inline.rs"]
mod tests;
