use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel, with `opacity` scaling the source.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite a flat colour over every pixel of the buffer.
pub fn over_solid_in_place(dst: &mut [u8], color: PremulRgba8, opacity: f32) {
    for d in dst.chunks_exact_mut(4) {
        let out = over([d[0], d[1], d[2], d[3]], color, opacity);
        d.copy_from_slice(&out);
    }
}

/// CSS `saturate()` followed by `brightness()`, applied to premultiplied pixels.
///
/// Both filters are linear in the colour channels, so working on premultiplied values
/// gives the same result as unpremultiplying first. Results are clamped to alpha.
pub fn saturate_brightness_in_place(rgba: &mut [u8], saturation: f32, brightness: f32) {
    let s = saturation.max(0.0);
    let b = brightness.max(0.0);
    let m = [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ];
    for px in rgba.chunks_exact_mut(4) {
        let a = f32::from(px[3]);
        if a == 0.0 {
            continue;
        }
        let c = [f32::from(px[0]), f32::from(px[1]), f32::from(px[2])];
        for (out, row) in px[..3].iter_mut().zip(m.iter()) {
            let v = (row[0] * c[0] + row[1] * c[1] + row[2] * c[2]) * b;
            *out = v.round().clamp(0.0, a) as u8;
        }
    }
}
