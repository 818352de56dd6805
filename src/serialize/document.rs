use std::fmt::Write;

use futures::future::join_all;

use crate::assets::inline::ResourceInliner;
use crate::foundation::core::{PixelSize, Point};
use crate::foundation::error::{LockshotError, LockshotResult};
use crate::serialize::background::{apply_embeddings, collect_embed_jobs};
use crate::serialize::paint::paint_tree;
use crate::serialize::xml::{XHTML_NS, write_xhtml};
use crate::style::resolved::{StyleResolver, inline_styles_recursively};
use crate::tree::load::{ImageLoad, LoadOutcome};
use crate::tree::node::VisualNode;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A self-contained vector document of a composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializedDocument {
    pub xml: String,
    pub width: u32,
    pub height: u32,
}

impl SerializedDocument {
    pub fn size(&self) -> PixelSize {
        PixelSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Turns a live composition into a [`SerializedDocument`].
///
/// The document embeds the composition twice inside a `<switch>`: as XHTML in a
/// `<foreignObject>` for renderers with an HTML engine, and as plain SVG shapes for the rest.
/// Every computed style is inlined and every reachable image is embedded as a data URL.
#[derive(Clone, Debug)]
pub struct CompositionSerializer<R> {
    resolver: R,
    inliner: ResourceInliner,
}

impl<R: StyleResolver> CompositionSerializer<R> {
    pub fn new(resolver: R, inliner: ResourceInliner) -> Self {
        Self { resolver, inliner }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn inliner(&self) -> &ResourceInliner {
        &self.inliner
    }

    /// Serialize the composition rooted at `root`.
    ///
    /// Fails with [`LockshotError::PreviewUnavailable`] when there is no root or it has no
    /// layout box. Resources that cannot be embedded keep their original reference.
    #[tracing::instrument(skip_all)]
    pub async fn serialize(&self, root: Option<&VisualNode>) -> LockshotResult<SerializedDocument> {
        let root = root.ok_or_else(|| {
            LockshotError::preview_unavailable("no composition is bound for export")
        })?;

        let loads = root.image_loads();
        let outcomes = join_all(loads.iter().map(ImageLoad::wait)).await;
        let broken = outcomes
            .iter()
            .filter(|o| **o == LoadOutcome::Failed)
            .count();
        if broken > 0 {
            tracing::debug!(broken, total = outcomes.len(), "some images failed to load");
        }

        let bounds = root.layout.ok_or_else(|| {
            LockshotError::preview_unavailable("composition has not been laid out")
        })?;
        let size = PixelSize::from_rect(bounds);

        let mut clone = root.clone();
        inline_styles_recursively(&self.resolver, root, &mut clone);

        let jobs = collect_embed_jobs(root, &clone);
        let results = join_all(jobs.iter().map(|job| self.inliner.embed(&job.reference))).await;
        let failed = apply_embeddings(&mut clone, &jobs, results);
        tracing::debug!(
            references = jobs.len(),
            failed,
            width = size.width,
            height = size.height,
            "serialized composition"
        );

        Ok(SerializedDocument {
            xml: build_document(&clone, size, Point::new(bounds.x0, bounds.y0)),
            width: size.width,
            height: size.height,
        })
    }
}

fn build_document(clone: &VisualNode, size: PixelSize, origin: Point) -> String {
    let PixelSize { width, height } = size;
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"{SVG_NS}\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    out.push_str("<switch>");
    let _ = write!(
        out,
        "<foreignObject width=\"100%\" height=\"100%\" requiredExtensions=\"{XHTML_NS}\">"
    );
    let _ = write!(out, "<div xmlns=\"{XHTML_NS}\">");
    write_xhtml(&mut out, clone);
    out.push_str("</div></foreignObject>");
    out.push_str("<g>");
    paint_tree(&mut out, clone, origin);
    out.push_str("</g></switch></svg>");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/document.rs"]
mod tests;
