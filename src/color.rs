// Colors used by the backdrop: packed RGBA for the connection lines,
// HSL for the particles themselves. Both render to CSS strings for the canvas.

use serde::Deserialize;

// Simple color struct, created from an unsigned 32 representing RRGGBBAA
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "u32")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // The packed alpha is ignored, callers always supply their own
    pub fn to_css_with_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl From<u32> for Color {
    fn from(num: u32) -> Self {
        Color::from_u32(num)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Hsl {
        Hsl {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn to_css_with_alpha(&self, alpha: f64) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let cyan = Color::from_u32(0x00f5ffff);
        assert_eq!(
            cyan,
            Color {
                r: 0,
                g: 245,
                b: 255,
                a: 255
            }
        );
    }

    #[test]
    fn rgba_uses_supplied_alpha() {
        let cyan = Color::from_u32(0x00f5ff00);
        assert_eq!(cyan.to_css_with_alpha(0.15), "rgba(0, 245, 255, 0.15)");
    }

    #[test]
    fn hsla_formats_percentages() {
        let hsl = Hsl::new(200.5, 70.0, 60.0);
        assert_eq!(hsl.to_css_with_alpha(0.4), "hsla(200.5, 70%, 60%, 0.4)");
    }

    #[test]
    fn deserializes_from_packed_integer() {
        let color: Color = serde_json::from_str("16121855").unwrap();
        assert_eq!((color.r, color.g, color.b, color.a), (0, 245, 255, 255));
    }
}
