use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{CORNER_RADIUS_DP, Density, Rgba8},
        error::{CardError, CardResult},
    },
    style::{color::ColorDef, source::CardStyle},
};

/// Serializable card style, typically loaded from JSON.
///
/// ```json
/// { "fill": "#ffffff", "stroke": [0.0, 0.0, 0.0], "density": 2.0 }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardStyleConfig {
    /// Background fill color.
    pub fill: ColorDef,
    /// Outline color.
    pub stroke: ColorDef,
    /// Display density (device pixels per logical unit).
    #[serde(default = "default_density")]
    pub density: f32,
}

fn default_density() -> f32 {
    1.0
}

impl Default for CardStyleConfig {
    fn default() -> Self {
        Self {
            fill: ColorDef::from(Rgba8::opaque(255, 255, 255)),
            stroke: ColorDef::from(Rgba8::opaque(0, 0, 0)),
            density: default_density(),
        }
    }
}

impl CardStyleConfig {
    /// Parse and validate a JSON style document.
    pub fn from_json_str(s: &str) -> CardResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| CardError::config(format!("invalid style json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON style file.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read style file '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Validate numeric fields.
    pub fn validate(&self) -> CardResult<()> {
        Density::new(self.density)?;
        Ok(())
    }

    /// Corner radius in device pixels for this configuration.
    pub fn corner_radius_px(&self) -> CardResult<f32> {
        Ok(Density::new(self.density)?.to_pixels(CORNER_RADIUS_DP))
    }

    /// Build a live style source from this configuration.
    pub fn into_style(self) -> CardResult<CardStyle> {
        let density = Density::new(self.density)?;
        Ok(CardStyle::new(
            self.fill.to_rgba8(),
            self.stroke.to_rgba8(),
            density,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
