use kurbo::{PathEl, Shape};
use resvg::tiny_skia::{
    self, FillRule, FilterQuality, Mask, Paint, PathBuilder, Pattern, Pixmap, PixmapPaint,
    SpreadMode, Stroke, Transform,
};

use crate::assets::decode::decode_pixmap;
use crate::export::config::CardOptions;
use crate::foundation::core::{Rect, RoundedRect};
use crate::foundation::error::{LockshotError, LockshotResult};
use crate::render::blur::blur_pixmap;
use crate::render::composite::{over_solid_in_place, saturate_brightness_in_place};
use crate::render::encode::{RasterArtifact, encode_png};

/// The background layer is blurred at this fraction of the card resolution.
const BACKGROUND_DOWNSAMPLE: u32 = 4;

/// Where the pieces of a card land on the square canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardGeometry {
    /// Edge length of the canvas.
    pub size: f64,
    pub padding: f64,
    /// Cover-fit rectangle of the blurred background. Always contains the canvas.
    pub background: Rect,
    /// Fit rectangle of the sharp foreground, centered.
    pub foreground: Rect,
    pub corner_radius: f64,
}

impl CardGeometry {
    pub fn foreground_shape(&self) -> RoundedRect {
        RoundedRect::from_rect(self.foreground, self.corner_radius)
    }
}

pub fn card_geometry(width: u32, height: u32, options: &CardOptions) -> CardGeometry {
    let t = f64::from(options.size);
    let (w, h) = (f64::from(width.max(1)), f64::from(height.max(1)));
    let padding = t * options.padding_fraction;

    let cover = (t / w).max(t / h);
    let background = centered(t, w * cover, h * cover);

    let inner = t - 2.0 * padding;
    let fit = (inner / w).min(inner / h);
    let foreground = centered(t, w * fit, h * fit);

    let corner_radius = options
        .min_corner_radius
        .max(options.corner_radius_fraction * foreground.width().min(foreground.height()));

    CardGeometry {
        size: t,
        padding,
        background,
        foreground,
        corner_radius,
    }
}

fn centered(canvas: f64, w: f64, h: f64) -> Rect {
    let x = (canvas - w) / 2.0;
    let y = (canvas - h) / 2.0;
    Rect::new(x, y, x + w, y + h)
}

/// Frame a raster as a square card: blurred cover background, scrim, rounded foreground and
/// a translucent border.
#[tracing::instrument(skip_all, fields(width = base.width, height = base.height))]
pub fn compose_card(base: &RasterArtifact, options: &CardOptions) -> LockshotResult<RasterArtifact> {
    let source = decode_pixmap(&base.png)?;
    let geometry = card_geometry(source.width(), source.height(), options);
    let size = options.size;

    let mut canvas = Pixmap::new(size, size)
        .ok_or_else(|| LockshotError::validation(format!("cannot allocate {size}x{size} card")))?;

    let background = blurred_background(&source, &geometry, options)?;
    let up = f64::from(size) / f64::from(background.width());
    fill_with(&mut canvas, &background, scale_translate(up, 0.0, 0.0), FilterQuality::Bilinear)?;

    over_solid_in_place(canvas.data_mut(), [0, 0, 0, 255], options.scrim_opacity as f32);

    let path = rounded_rect_path(&geometry.foreground_shape())?;
    let mut mask = Mask::new(size, size)
        .ok_or_else(|| LockshotError::validation("cannot allocate card mask"))?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());

    let fit = geometry.foreground.width() / f64::from(source.width());
    canvas.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        },
        scale_translate(fit, geometry.foreground.x0, geometry.foreground.y0),
        Some(&mask),
    );

    if options.border_width > 0.0 && options.border_opacity > 0.0 {
        let mut paint = Paint::default();
        let alpha = (options.border_opacity * 255.0).round().clamp(0.0, 255.0) as u8;
        paint.set_color_rgba8(255, 255, 255, alpha);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: options.border_width as f32,
            ..Stroke::default()
        };
        canvas.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    tracing::debug!(
        fg_w = geometry.foreground.width(),
        fg_h = geometry.foreground.height(),
        radius = geometry.corner_radius,
        "composed card"
    );
    encode_png(&canvas)
}

/// Cover-fill, blur and tone the background at reduced resolution.
fn blurred_background(
    source: &Pixmap,
    geometry: &CardGeometry,
    options: &CardOptions,
) -> LockshotResult<Pixmap> {
    let small = options.size.div_ceil(BACKGROUND_DOWNSAMPLE);
    let mut layer = Pixmap::new(small, small)
        .ok_or_else(|| LockshotError::validation("cannot allocate card background"))?;

    let down = f64::from(small) / geometry.size;
    let cover = geometry.background.width() / f64::from(source.width()) * down;
    fill_with(
        &mut layer,
        source,
        scale_translate(cover, geometry.background.x0 * down, geometry.background.y0 * down),
        FilterQuality::Bilinear,
    )?;

    blur_pixmap(&mut layer, (options.blur_px * down) as f32)?;
    saturate_brightness_in_place(
        layer.data_mut(),
        options.saturation as f32,
        options.brightness as f32,
    );
    Ok(layer)
}

/// Paint `image` over the whole of `target`, padding past its edges so nothing is left bare.
fn fill_with(
    target: &mut Pixmap,
    image: &Pixmap,
    transform: Transform,
    quality: FilterQuality,
) -> LockshotResult<()> {
    let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, target.width() as f32, target.height() as f32)
        .ok_or_else(|| LockshotError::validation("empty fill target"))?;
    let paint = Paint {
        shader: Pattern::new(image.as_ref(), SpreadMode::Pad, quality, 1.0, transform),
        ..Paint::default()
    };
    target.fill_rect(rect, &paint, Transform::identity(), None);
    Ok(())
}

fn scale_translate(scale: f64, tx: f64, ty: f64) -> Transform {
    Transform::from_row(scale as f32, 0.0, 0.0, scale as f32, tx as f32, ty as f32)
}

fn rounded_rect_path(shape: &RoundedRect) -> LockshotResult<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in shape.path_elements(0.1) {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(a, p) => pb.quad_to(a.x as f32, a.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(a, b, p) => pb.cubic_to(
                a.x as f32, a.y as f32, b.x as f32, b.y as f32, p.x as f32, p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
        .ok_or_else(|| LockshotError::validation("degenerate card foreground"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/card.rs"]
mod tests;
