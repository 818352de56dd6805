use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::*;
use crate::assets::fetch::FetchedAsset;

/// Serves `ok-*` paths as PNG bytes, fails everything else; counts calls.
#[derive(Default)]
struct CountingFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl AssetFetcher for CountingFetcher {
    async fn fetch(&self, url: &Url) -> LockshotResult<FetchedAsset> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if url.path().contains("/ok-") {
            Ok(FetchedAsset {
                content_type: Some("image/png".to_string()),
                bytes: b"png".to_vec(),
            })
        } else {
            Err(LockshotError::resource_fetch(format!("GET {url}: HTTP 404")))
        }
    }
}

fn inliner() -> (ResourceInliner, Arc<CountingFetcher>) {
    let fetcher = Arc::new(CountingFetcher::default());
    let base = Url::parse("https://memes.example/app/index.html").unwrap();
    (ResourceInliner::new(base, fetcher.clone()), fetcher)
}

#[tokio::test]
async fn data_urls_are_returned_unchanged_without_fetching() {
    let (inliner, fetcher) = inliner();
    let data = "data:image/png;base64,cG5n";
    let embedded = inliner.embed(data).await.unwrap();
    assert_eq!(embedded.data_url, data);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn embedding_twice_is_idempotent() {
    let (inliner, _) = inliner();
    let first = inliner.embed("ok-bg.png").await.unwrap();
    let second = inliner.embed(&first.data_url).await.unwrap();
    assert_eq!(first.data_url, second.data_url);
    assert_eq!(first.data_url, "data:image/png;base64,cG5n");
}

#[tokio::test]
async fn relative_references_resolve_against_the_base() {
    let (inliner, _) = inliner();
    let embedded = inliner.embed("templates/ok-bg.png").await.unwrap();
    assert_eq!(
        embedded.identity,
        "https://memes.example/app/templates/ok-bg.png"
    );
    let abs = inliner.embed("/ok-root.png").await.unwrap();
    assert_eq!(abs.identity, "https://memes.example/ok-root.png");
}

#[tokio::test]
async fn concurrent_embeds_of_one_url_share_one_fetch() {
    let (inliner, fetcher) = inliner();
    let (a, b) = futures::join!(
        inliner.embed("ok-icon.png"),
        inliner.embed("https://memes.example/app/ok-icon.png")
    );
    assert_eq!(a.unwrap().data_url, b.unwrap().data_url);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(inliner.cached_len(), 1);
}

#[tokio::test]
async fn clones_share_the_cache() {
    let (inliner, fetcher) = inliner();
    inliner.embed("ok-a.png").await.unwrap();
    inliner.clone().embed("ok-a.png").await.unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failures_surface_as_fetch_errors_and_stay_cached() {
    let (inliner, fetcher) = inliner();
    let first = inliner.embed("missing.png").await.unwrap_err();
    let second = inliner.embed("missing.png").await.unwrap_err();
    assert!(matches!(first, LockshotError::ResourceFetch(ref m) if m.contains("404")));
    assert!(!first.is_hard_failure());
    assert!(matches!(second, LockshotError::ResourceFetch(_)));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}
