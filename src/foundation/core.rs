use crate::foundation::error::{CardError, CardResult};

/// Corner radius of the card frame in logical (density-independent) units.
pub const CORNER_RADIUS_DP: f32 = 5.0;

/// Straight-alpha RGBA8 color, as supplied by style sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from straight-alpha channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Premultiply into the pixel format stored by surfaces.
    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Convert back to straight alpha. Fully transparent pixels map to transparent black.
    pub fn to_straight(self) -> Rgba8 {
        if self.a == 0 {
            return Rgba8::transparent();
        }
        let a = u16::from(self.a);
        let unpremul = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
        Rgba8::new(unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a)
    }
}

/// Display density used to convert logical units into device pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Density(f32);

impl Density {
    /// One device pixel per logical unit.
    pub const IDENTITY: Self = Self(1.0);

    /// Create a validated density scale.
    pub fn new(scale: f32) -> CardResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CardError::config("density must be finite and > 0"));
        }
        Ok(Self(scale))
    }

    /// Device pixels per logical unit.
    pub fn scale(self) -> f32 {
        self.0
    }

    /// Convert logical units into device pixels.
    pub fn to_pixels(self, logical: f32) -> f32 {
        logical * self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
