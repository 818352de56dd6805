use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use url::Url;

use super::*;
use crate::assets::fetch::{AssetFetcher, FetchedAsset};
use crate::foundation::error::LockshotError;
use crate::template::model::{NotificationSlot, PreviewConfig, TemplateAssets};

#[derive(Default)]
struct CountingFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl AssetFetcher for CountingFetcher {
    async fn fetch(&self, url: &Url) -> LockshotResult<FetchedAsset> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.path().contains("missing") {
            return Err(LockshotError::resource_fetch("HTTP 404"));
        }
        Ok(FetchedAsset {
            content_type: Some("image/png".into()),
            bytes: vec![1, 2, 3],
        })
    }
}

fn template(icon: &str) -> MemeTemplate {
    MemeTemplate {
        id: "t".into(),
        name: "T".into(),
        description: String::new(),
        layout: None,
        assets: TemplateAssets {
            background: "templates/t/bg.jpg".into(),
            app_icon: icon.into(),
            preview: None,
        },
        fields: Vec::new(),
        defaults: FieldValues::new(),
        notifications: (0..2)
            .map(|i| NotificationSlot {
                title_key: "title".into(),
                text_key: format!("msg{i}"),
                time_label: None,
            })
            .collect(),
        preview: PreviewConfig {
            time: "9:41".into(),
            subtitle: "hoje".into(),
            battery: "80%".into(),
            notification_time: "agora".into(),
        },
    }
}

fn session(icon: &str) -> (PreviewSession, Arc<CountingFetcher>) {
    let fetcher = Arc::new(CountingFetcher::default());
    let inliner = ResourceInliner::new(Url::parse("https://memes.test/").unwrap(), fetcher.clone());
    let session = PreviewSession::new(&template(icon), &FieldValues::new(), inliner).unwrap();
    (session, fetcher)
}

#[test]
fn card_is_laid_out_at_phone_size() {
    let (session, _) = session("templates/t/icon.png");
    let bounds = session.bounds();
    assert_eq!(bounds.x0, 0.0);
    assert!((bounds.width() - 390.0).abs() < 0.5, "{bounds:?}");
    assert!((bounds.height() - 644.0).abs() < 0.5, "{bounds:?}");

    let badge = session.root().node_at(&[3, 0, 0]).unwrap().layout.unwrap();
    assert!((badge.width() - 45.0).abs() < 0.5, "{badge:?}");
    assert!(bounds.contains(badge.origin()));
}

#[test]
fn image_loads_start_pending() {
    let (session, fetcher) = session("templates/t/icon.png");
    let loads = session.root().image_loads();
    assert_eq!(loads.len(), 2);
    assert!(loads.iter().all(|l| !l.is_complete()));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn export_joins_the_preview_fetches() {
    let (session, fetcher) = session("templates/t/icon.png");
    let doc = session.serializer().serialize(Some(session.root())).await.unwrap();
    assert_eq!((doc.width, doc.height), (390, 644));
    // icon once (shared by both badges and their loads) plus the background
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(session.inliner().cached_len(), 2);
    assert!(doc.xml.contains("data:image/png;base64,AQID"));
}

#[tokio::test]
async fn broken_icons_settle_as_failed() {
    let (session, _) = session("templates/t/missing.png");
    let loads = session.root().image_loads();
    for load in &loads {
        assert_eq!(load.wait().await, LoadOutcome::Failed);
    }
    let doc = session.serializer().serialize(Some(session.root())).await.unwrap();
    assert!(doc.xml.contains("templates/t/missing.png"));
}
