use std::sync::Arc;

use crate::assets::inline::ResourceInliner;
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::LockshotResult;
use crate::layout::flex::layout_tree;
use crate::preview::build::build_preview;
use crate::preview::sheet::preview_resolver;
use crate::serialize::document::CompositionSerializer;
use crate::style::sheet::SheetResolver;
use crate::template::model::MemeTemplate;
use crate::text::tokens::FieldValues;
use crate::tree::load::{ImageLoad, LoadOutcome};
use crate::tree::node::VisualNode;

/// Viewport the preview card is laid out in.
pub const PREVIEW_VIEWPORT: Size = Size::new(390.0, 844.0);

/// A laid-out preview plus the collaborators needed to export it.
///
/// Image nodes get loads that go through the session's inliner, so the fetch a preview
/// triggers is the same one the export joins.
#[derive(Debug)]
pub struct PreviewSession {
    resolver: Arc<SheetResolver>,
    inliner: ResourceInliner,
    root: VisualNode,
    bounds: Rect,
}

impl PreviewSession {
    pub fn new(
        template: &MemeTemplate,
        values: &FieldValues,
        inliner: ResourceInliner,
    ) -> LockshotResult<Self> {
        let resolver = Arc::new(preview_resolver()?);
        let mut root = build_preview(template, values);
        attach_loads(&mut root, &inliner);
        let bounds = layout_tree(&mut root, resolver.as_ref(), PREVIEW_VIEWPORT)?;
        tracing::debug!(
            template = %template.id,
            width = bounds.width(),
            height = bounds.height(),
            nodes = root.subtree_len(),
            "built preview"
        );
        Ok(Self {
            resolver,
            inliner,
            root,
            bounds,
        })
    }

    pub fn root(&self) -> &VisualNode {
        &self.root
    }

    /// Border box of the preview card.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn resolver(&self) -> Arc<SheetResolver> {
        Arc::clone(&self.resolver)
    }

    pub fn inliner(&self) -> &ResourceInliner {
        &self.inliner
    }

    /// A serializer sharing this session's resolver and resource cache.
    pub fn serializer(&self) -> CompositionSerializer<Arc<SheetResolver>> {
        CompositionSerializer::new(self.resolver(), self.inliner.clone())
    }
}

fn attach_loads(node: &mut VisualNode, inliner: &ResourceInliner) {
    if node.is_image()
        && let Some(src) = node.active_image_source().map(str::to_owned)
    {
        let inliner = inliner.clone();
        let load = ImageLoad::pending(async move {
            match inliner.embed(&src).await {
                Ok(_) => LoadOutcome::Loaded,
                Err(e) => {
                    tracing::debug!(src = %src, error = %e, "preview image failed to load");
                    LoadOutcome::Failed
                }
            }
        });
        node.image.get_or_insert_with(Default::default).load = load;
    }
    for child in &mut node.children {
        attach_loads(child, inliner);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/session.rs"]
mod tests;
