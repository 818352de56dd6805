use crate::export::config::ExportConfig;
use crate::export::filename::ExportVariant;
use crate::foundation::error::LockshotResult;
use crate::render::card::compose_card;
use crate::render::encode::RasterArtifact;
use crate::render::raster::rasterize;
use crate::serialize::document::{CompositionSerializer, SerializedDocument};
use crate::style::resolved::StyleResolver;
use crate::tree::node::VisualNode;

/// Turns a laid-out composition into PNG exports.
///
/// Pipeline:
/// 1. [`CompositionSerializer::serialize`]
/// 2. [`rasterize`] at the variant's scale
/// 3. [`compose_card`] for [`ExportVariant::Card`]
///
/// Any hard failure aborts the export; nothing is retried.
#[derive(Clone, Debug)]
pub struct Exporter<R> {
    serializer: CompositionSerializer<R>,
    config: ExportConfig,
}

impl<R: StyleResolver> Exporter<R> {
    pub fn new(serializer: CompositionSerializer<R>, config: ExportConfig) -> LockshotResult<Self> {
        config.validate()?;
        Ok(Self { serializer, config })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub async fn serialize(&self, root: Option<&VisualNode>) -> LockshotResult<SerializedDocument> {
        self.serializer.serialize(root).await
    }

    /// Screen-resolution export: the root's box times `raw_scale`.
    #[tracing::instrument(skip_all, fields(scale = self.config.raw_scale))]
    pub async fn export_raw(&self, root: Option<&VisualNode>) -> LockshotResult<RasterArtifact> {
        let doc = self.serializer.serialize(root).await?;
        let artifact = rasterize(&doc.xml, doc.width, doc.height, self.config.raw_scale)?;
        tracing::info!(
            width = artifact.width,
            height = artifact.height,
            bytes = artifact.png.len(),
            "raw export ready"
        );
        Ok(artifact)
    }

    /// Square card export.
    #[tracing::instrument(skip_all, fields(size = self.config.card.size))]
    pub async fn export_card(&self, root: Option<&VisualNode>) -> LockshotResult<RasterArtifact> {
        let doc = self.serializer.serialize(root).await?;
        let base = rasterize(
            &doc.xml,
            doc.width,
            doc.height,
            self.config.card.intermediate_scale,
        )?;
        let artifact = compose_card(&base, &self.config.card)?;
        tracing::info!(
            width = artifact.width,
            height = artifact.height,
            bytes = artifact.png.len(),
            "card export ready"
        );
        Ok(artifact)
    }

    pub async fn export(
        &self,
        root: Option<&VisualNode>,
        variant: ExportVariant,
    ) -> LockshotResult<RasterArtifact> {
        match variant {
            ExportVariant::Raw => self.export_raw(root).await,
            ExportVariant::Card => self.export_card(root).await,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
