use crate::foundation::error::{LockshotError, LockshotResult};

/// Export settings. Every field has a default so partial JSON files are accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// Device pixels per logical pixel for the raw export.
    pub raw_scale: u32,
    pub card: CardOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            raw_scale: 2,
            card: CardOptions::default(),
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> LockshotResult<()> {
        if self.raw_scale == 0 {
            return Err(LockshotError::validation("rawScale must be >= 1"));
        }
        self.card.validate()
    }
}

/// Framing of the square card export.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardOptions {
    /// Edge length of the square output, in pixels.
    pub size: u32,
    /// Scale of the raster the card is composed from.
    pub intermediate_scale: u32,
    /// Padding around the foreground, as a fraction of `size`.
    pub padding_fraction: f64,
    /// Corner radius as a fraction of the smaller foreground side.
    pub corner_radius_fraction: f64,
    pub min_corner_radius: f64,
    /// Background blur, in output pixels.
    pub blur_px: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub scrim_opacity: f64,
    pub border_opacity: f64,
    pub border_width: f64,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            size: 1080,
            intermediate_scale: 3,
            padding_fraction: 0.07,
            corner_radius_fraction: 0.045,
            min_corner_radius: 12.0,
            blur_px: 26.0,
            saturation: 0.88,
            brightness: 0.72,
            scrim_opacity: 0.24,
            border_opacity: 0.5,
            border_width: 2.0,
        }
    }
}

impl CardOptions {
    pub fn validate(&self) -> LockshotResult<()> {
        if self.size == 0 {
            return Err(LockshotError::validation("card size must be >= 1"));
        }
        if self.intermediate_scale == 0 {
            return Err(LockshotError::validation(
                "card intermediateScale must be >= 1",
            ));
        }
        if !self.padding_fraction.is_finite() || !(0.0..0.5).contains(&self.padding_fraction) {
            return Err(LockshotError::validation(
                "card paddingFraction must be in [0, 0.5)",
            ));
        }
        for (name, v) in [
            ("cornerRadiusFraction", self.corner_radius_fraction),
            ("minCornerRadius", self.min_corner_radius),
            ("blurPx", self.blur_px),
            ("saturation", self.saturation),
            ("brightness", self.brightness),
            ("borderWidth", self.border_width),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LockshotError::validation(format!(
                    "card {name} must be finite and >= 0"
                )));
            }
        }
        for (name, v) in [
            ("scrimOpacity", self.scrim_opacity),
            ("borderOpacity", self.border_opacity),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(LockshotError::validation(format!(
                    "card {name} must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/config.rs"]
mod tests;
