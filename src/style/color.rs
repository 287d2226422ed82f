use serde::{Deserialize, Serialize};
use tiny_skia::{Color, ColorU8, PremultipliedColorU8};

use super::Style;

/// Straight (non-premultiplied) 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_skia(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    /// Pixel value for writing straight into a pixmap
    pub fn premultiplied(self) -> PremultipliedColorU8 {
        ColorU8::from_rgba(self.r, self.g, self.b, self.a).premultiply()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorProps {
    pub color: Rgba,
    /// Resolve to a gray value of equal luminance when building tools
    #[serde(default)]
    pub convert_to_gray: bool,
}

impl ColorProps {
    pub fn new(color: Rgba) -> Self {
        Self {
            color,
            convert_to_gray: false,
        }
    }
}

pub type ColorStyle = Style<ColorProps>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_premultiplied_half_alpha() {
        let px = Rgba::new(255, 0, 0, 128).premultiplied();
        assert_eq!(px.alpha(), 128);
        assert_eq!(px.red(), 128);
        assert_eq!(px.green(), 0);
    }

    #[test]
    fn test_color_props_default_gray_flag() {
        let props: ColorProps =
            serde_json::from_str(r#"{"color":{"r":1,"g":2,"b":3,"a":4}}"#).unwrap();
        assert_eq!(props.color, Rgba::new(1, 2, 3, 4));
        assert!(!props.convert_to_gray);
    }
}
