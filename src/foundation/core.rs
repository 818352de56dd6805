pub use kurbo::{Point, Rect, RoundedRect, Size};

/// Logical size of a rendered composition, rounded to whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Round a layout box to the nearest whole pixel, never going below 1x1.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            width: round_px(rect.width()),
            height: round_px(rect.height()),
        }
    }

    /// Multiply both dimensions, failing on overflow.
    pub fn checked_scale(self, scale: u32) -> Option<Self> {
        Some(Self {
            width: self.width.checked_mul(scale)?,
            height: self.height.checked_mul(scale)?,
        })
    }
}

/// Round a length to the nearest pixel, minimum 1.
pub fn round_px(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 1;
    }
    (v.round().min(f64::from(u32::MAX)) as u32).max(1)
}
