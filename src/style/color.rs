use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// Color as written in style configuration.
///
/// Accepts `"#RRGGBB"` / `"#RRGGBBAA"` (the `#` is optional) or an array of `0..=255`
/// channels, `[r, g, b]` or `[r, g, b, a]`. Serializes back to `"#rrggbbaa"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "String")]
pub struct ColorDef(Rgba8);

impl ColorDef {
    /// Straight-alpha color.
    pub fn to_rgba8(self) -> Rgba8 {
        self.0
    }
}

impl From<Rgba8> for ColorDef {
    fn from(c: Rgba8) -> Self {
        Self(c)
    }
}

impl From<ColorDef> for String {
    fn from(c: ColorDef) -> Self {
        let Rgba8 { r, g, b, a } = c.0;
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Channels(Vec<u8>),
}

impl TryFrom<ColorRepr> for ColorDef {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        let c = match repr {
            ColorRepr::Hex(s) => parse_hex(&s)?,
            ColorRepr::Channels(v) => match *v.as_slice() {
                [r, g, b] => Rgba8::opaque(r, g, b),
                [r, g, b, a] => Rgba8::new(r, g, b, a),
                _ => {
                    return Err(format!(
                        "color array must have 3 or 4 channels, got {}",
                        v.len()
                    ));
                }
            },
        };
        Ok(Self(c))
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let digits = s.trim().trim_start_matches('#');
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color \"{s}\""));
    }
    let packed = match digits.len() {
        6 => u32::from_str_radix(digits, 16).map(|rgb| (rgb << 8) | 0xff),
        8 => u32::from_str_radix(digits, 16),
        _ => return Err("hex color must be #RRGGBB or #RRGGBBAA".to_owned()),
    }
    .map_err(|e| format!("invalid hex color \"{s}\": {e}"))?;

    let [r, g, b, a] = packed.to_be_bytes();
    Ok(Rgba8::new(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
