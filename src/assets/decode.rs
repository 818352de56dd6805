use anyhow::Context;
use resvg::tiny_skia::{IntSize, Pixmap};

use crate::foundation::error::{LockshotError, LockshotResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decode an encoded raster (PNG, JPEG, ...) into a premultiplied pixmap.
pub fn decode_pixmap(bytes: &[u8]) -> LockshotResult<Pixmap> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| LockshotError::image_decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| LockshotError::image_decode("decoded image has zero area"))?;
    Pixmap::from_vec(rgba8_premul, size)
        .ok_or_else(|| LockshotError::image_decode("decoded image does not fit a pixmap"))
}
