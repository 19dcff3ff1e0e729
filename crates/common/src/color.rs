use serde::{Deserialize, Serialize};

/// Linear RGB color with channels nominally in `[0, 1]`.
///
/// Serializes as a `#rrggbb` string. Deserializes from any of the formats a
/// debug panel hands out: a hex string, a `0xRRGGBB` integer, an `{r, g, b}`
/// object, or an `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Errors from parsing a color.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
    #[error("integer color {0:#x} exceeds 0xffffff")]
    OutOfRange(u32),
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(hex.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = match digits.len() {
            6 => u32::from_str_radix(digits, 16).map_err(|_| invalid())?,
            3 => {
                let short = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                let (r, g, b) = ((short >> 8) & 0xf, (short >> 4) & 0xf, short & 0xf);
                (r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11)
            }
            _ => return Err(invalid()),
        };
        Self::from_u32(value)
    }

    /// Build from a packed `0xRRGGBB` integer.
    pub fn from_u32(value: u32) -> Result<Self, ColorError> {
        if value > 0xff_ffff {
            return Err(ColorError::OutOfRange(value));
        }
        Ok(Self::hex(value))
    }

    /// Packed `0xRRGGBB` literal; bits above the low 24 are ignored.
    pub const fn hex(value: u32) -> Self {
        Self::rgb(
            ((value >> 16) & 0xff) as f32 / 255.0,
            ((value >> 8) & 0xff) as f32 / 255.0,
            (value & 0xff) as f32 / 255.0,
        )
    }

    pub fn to_u32(self) -> u32 {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        quantize(self.r) << 16 | quantize(self.g) << 8 | quantize(self.b)
    }

    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.to_u32())
    }

    /// Componentwise linear interpolation; `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgb(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Int(u32),
    Object { r: f32, g: f32, b: f32 },
    Array([f32; 3]),
}

impl TryFrom<ColorRepr> for Color {
    type Error = ColorError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => Self::from_hex(&s),
            ColorRepr::Int(v) => Self::from_u32(v),
            ColorRepr::Object { r, g, b } => Ok(Self::rgb(r, g, b)),
            ColorRepr::Array(rgb) => Ok(Self::from(rgb)),
        }
    }
}
