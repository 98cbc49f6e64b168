use serde::{Deserialize, Serialize};

/// A resolved RGBA color: 8-bit channels plus a normalized alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in the range 0.0..=1.0.
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Fully transparent black (`#00000000`), the placeholder value tools emit
    /// for paths whose real paint is a gradient.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse an Android hex color.
    ///
    /// Accepts `#RRGGBB` and the alpha-first `#AARRGGBB`. Byte 0 of the
    /// eight-digit form is the alpha channel, bytes 1..=3 are red, green and
    /// blue. Every other spelling returns `None`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let digits = value.trim().strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

        match digits.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => {
                let alpha = byte(0)?;
                Some(Self::rgba(
                    byte(2)?,
                    byte(4)?,
                    byte(6)?,
                    alpha as f32 / 255.0,
                ))
            }
            _ => None,
        }
    }

    /// Resolve an attribute value to a color.
    ///
    /// Six and eight digit hex values are decoded by [`Color::from_hex`].
    /// Anything else (shorthand hex, named colors, `@color/...` references,
    /// a missing `#`) resolves to opaque black.
    pub fn normalize(value: &str) -> Self {
        Self::from_hex(value).unwrap_or(Self::BLACK)
    }

    /// Returns whether this value can be parsed by [`Color::from_hex`].
    pub fn is_recognized(value: &str) -> bool {
        Self::from_hex(value).is_some()
    }

    /// Multiply an opacity attribute into the alpha channel.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: (self.a * opacity).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// RGB-first hex form `#RRGGBBAA`, the channel order web surfaces expect.
    pub fn to_rgba_hex(&self) -> String {
        let alpha = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, alpha)
    }

    /// CSS `rgba()` notation with a three decimal alpha.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
