//! Collecting and applying resource embeddings over a source/clone tree pair.

use std::collections::HashMap;

use crate::assets::data_url::is_data_url;
use crate::assets::inline::EmbeddedResource;
use crate::foundation::error::LockshotResult;
use crate::style::value::{css_urls, replace_css_urls};
use crate::tree::node::VisualNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EmbedTarget {
    /// A `url(...)` inside the clone's `background-image`.
    BackgroundImage,
    /// The active source of an image-content node.
    ImageSource,
}

/// One reference to embed, addressed by its child-index path from the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EmbedJob {
    pub path: Vec<usize>,
    pub target: EmbedTarget,
    pub reference: String,
}

/// Every embeddable reference in the pair, walking both trees positionally.
pub(crate) fn collect_embed_jobs(source: &VisualNode, clone: &VisualNode) -> Vec<EmbedJob> {
    let mut jobs = Vec::new();
    let mut path = Vec::new();
    collect(source, clone, &mut path, &mut jobs);
    jobs
}

fn collect(source: &VisualNode, clone: &VisualNode, path: &mut Vec<usize>, jobs: &mut Vec<EmbedJob>) {
    if let Some(bg) = clone.style_value("background-image")
        && bg != "none"
    {
        for u in css_urls(bg) {
            if !is_data_url(&u.url) {
                jobs.push(EmbedJob {
                    path: path.clone(),
                    target: EmbedTarget::BackgroundImage,
                    reference: u.url,
                });
            }
        }
    }
    if source.is_image()
        && clone.is_image()
        && let Some(src) = source.active_image_source()
    {
        jobs.push(EmbedJob {
            path: path.clone(),
            target: EmbedTarget::ImageSource,
            reference: src.to_string(),
        });
    }
    for (i, (s, c)) in source.children.iter().zip(&clone.children).enumerate() {
        path.push(i);
        collect(s, c, path, jobs);
        path.pop();
    }
}

/// Write successful embeddings into `clone`. Failed jobs leave their reference untouched.
///
/// Returns the number of failed jobs.
pub(crate) fn apply_embeddings(
    clone: &mut VisualNode,
    jobs: &[EmbedJob],
    results: Vec<LockshotResult<EmbeddedResource>>,
) -> usize {
    let mut failed = 0usize;
    let mut backgrounds: HashMap<&[usize], HashMap<&str, String>> = HashMap::new();

    for (job, result) in jobs.iter().zip(results) {
        let embedded = match result {
            Ok(e) => e,
            Err(e) => {
                failed += 1;
                tracing::warn!(url = %job.reference, error = %e, "keeping original reference");
                continue;
            }
        };
        match job.target {
            EmbedTarget::BackgroundImage => {
                backgrounds
                    .entry(job.path.as_slice())
                    .or_default()
                    .insert(job.reference.as_str(), embedded.data_url);
            }
            EmbedTarget::ImageSource => {
                if let Some(node) = clone.node_at_mut(&job.path) {
                    node.attributes.insert("src".to_string(), embedded.data_url);
                    node.attributes.remove("srcset");
                }
            }
        }
    }

    for (path, replacements) in backgrounds {
        let Some(node) = clone.node_at_mut(path) else {
            continue;
        };
        let Some(bg) = node.style_value("background-image") else {
            continue;
        };
        let next = replace_css_urls(bg, |url| replacements.get(url).cloned());
        node.set_style_value("background-image", next);
    }

    failed
}
