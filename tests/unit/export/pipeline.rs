use async_trait::async_trait;
use url::Url;

use super::*;
use crate::assets::fetch::{AssetFetcher, FetchedAsset};
use crate::assets::inline::ResourceInliner;
use crate::foundation::core::Rect;
use crate::foundation::error::LockshotError;
use crate::style::sheet::{SheetResolver, Stylesheet};

struct NoFetch;

#[async_trait]
impl AssetFetcher for NoFetch {
    async fn fetch(&self, url: &Url) -> LockshotResult<FetchedAsset> {
        Err(LockshotError::resource_fetch(format!("offline: {url}")))
    }
}

fn exporter(config: ExportConfig) -> LockshotResult<Exporter<SheetResolver>> {
    let sheet = Stylesheet::parse(".box { background-color: #336699; }").unwrap();
    let inliner = ResourceInliner::new(
        Url::parse("https://memes.test/").unwrap(),
        std::sync::Arc::new(NoFetch),
    );
    Exporter::new(
        CompositionSerializer::new(SheetResolver::new(sheet), inliner),
        config,
    )
}

fn colored_box(w: f64, h: f64) -> VisualNode {
    let mut node = VisualNode::new("div").with_class("box");
    node.layout = Some(Rect::new(0.0, 0.0, w, h));
    node
}

#[tokio::test]
async fn raw_export_doubles_the_bounds() {
    let exporter = exporter(ExportConfig::default()).unwrap();
    let png = exporter.export_raw(Some(&colored_box(40.4, 30.0))).await.unwrap();
    assert_eq!((png.width, png.height), (80, 60));

    let img = image::load_from_memory(&png.png).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(40, 30).0, [0x33, 0x66, 0x99, 255]);
}

#[tokio::test]
async fn card_export_is_square() {
    let mut config = ExportConfig::default();
    config.card.size = 240;
    let exporter = exporter(config).unwrap();
    let png = exporter
        .export(Some(&colored_box(39.0, 64.0)), ExportVariant::Card)
        .await
        .unwrap();
    assert_eq!((png.width, png.height), (240, 240));
}

#[tokio::test]
async fn missing_root_aborts_without_artifact() {
    let exporter = exporter(ExportConfig::default()).unwrap();
    let err = exporter.export_card(None).await.unwrap_err();
    assert!(matches!(err, LockshotError::PreviewUnavailable(_)));
    assert!(err.is_hard_failure());
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = ExportConfig {
        raw_scale: 0,
        ..ExportConfig::default()
    };
    assert!(matches!(
        exporter(config),
        Err(LockshotError::Validation(_))
    ));
}
