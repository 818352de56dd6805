use std::sync::{Arc, OnceLock};

use resvg::tiny_skia::{Pixmap, Transform};

use crate::foundation::core::PixelSize;
use crate::foundation::error::{LockshotError, LockshotResult};
use crate::render::encode::{RasterArtifact, encode_png};

static FONT_DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();

/// System fonts, loaded once per process.
fn font_database() -> Arc<usvg::fontdb::Database> {
    FONT_DB
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Rasterize an SVG document of logical size `width x height` at `scale` device pixels
/// per logical pixel, and encode it as PNG.
pub fn rasterize(xml: &str, width: u32, height: u32, scale: u32) -> LockshotResult<RasterArtifact> {
    if width == 0 || height == 0 {
        return Err(LockshotError::validation("raster size must be non-zero"));
    }
    if scale == 0 {
        return Err(LockshotError::validation("raster scale must be non-zero"));
    }
    let PixelSize {
        width: px_w,
        height: px_h,
    } = PixelSize { width, height }
        .checked_scale(scale)
        .ok_or_else(|| LockshotError::validation("raster size overflows"))?;

    let opts = usvg::Options {
        fontdb: font_database(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(xml, &opts)
        .map_err(|e| LockshotError::image_decode(format!("SVG parsing failed: {e}")))?;

    let mut pixmap = Pixmap::new(px_w, px_h)
        .ok_or_else(|| LockshotError::validation(format!("cannot allocate {px_w}x{px_h} pixmap")))?;

    // Draw the document into a width x height logical box, whatever its intrinsic size.
    let doc = tree.size();
    let sx = px_w as f32 / doc.width().max(f32::EPSILON);
    let sy = px_h as f32 / doc.height().max(f32::EPSILON);
    resvg::render(&tree, Transform::from_scale(sx, sy), &mut pixmap.as_mut());

    encode_png(&pixmap)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
