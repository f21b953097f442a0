//! Colors and hex color parsing.

use image::Rgba;

/// RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with a CSS-style alpha in `0.0..=1.0`.
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Alpha as a fraction.
    pub fn alpha(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

/// Parse a hex color string.
///
/// Supports `#RGB` and `#RRGGBB`. The result is opaque.
///
/// ```ignore
/// assert_eq!(parse_hex_color("#10b981").unwrap(), Color::rgb(16, 185, 129));
/// ```
pub fn parse_hex_color(hex: &str) -> Result<Color, String> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| "Color must start with '#'".to_string())?;

    let component = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| format!("Invalid hex digit in '{}'", hex))
    };

    match digits.len() {
        3 => {
            // #RGB doubles each digit: 0xF -> 0xFF
            let r = component(&digits[0..1])?;
            let g = component(&digits[1..2])?;
            let b = component(&digits[2..3])?;
            Ok(Color::rgb(r * 17, g * 17, b * 17))
        }
        6 => Ok(Color::rgb(
            component(&digits[0..2])?,
            component(&digits[2..4])?,
            component(&digits[4..6])?,
        )),
        n => Err(format!(
            "Color must be #RGB or #RRGGBB format, got {} characters",
            n
        )),
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba([color.r, color.g, color.b, color.a])
    }
}
