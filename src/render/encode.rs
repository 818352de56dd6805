use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use resvg::tiny_skia::Pixmap;

use crate::foundation::error::{LockshotError, LockshotResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// An encoded PNG and its pixel size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterArtifact {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Encode a premultiplied pixmap as PNG.
pub fn encode_png(pixmap: &Pixmap) -> LockshotResult<RasterArtifact> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut rgba = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&rgba, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| LockshotError::encoding(format!("PNG encoding failed: {e}")))?;
    if png.is_empty() {
        return Err(LockshotError::encoding("PNG encoder produced no output"));
    }
    Ok(RasterArtifact { png, width, height })
}
