//! Color resolution with the grayscale policy applied

use crate::style::{ColorStyle, Rgba};

/// Luminance of an RGB triple, each weighted channel rounded separately
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let sum = (r as f32 * 0.3).round() + (g as f32 * 0.59).round() + (b as f32 * 0.11).round();
    sum.min(255.0) as u8
}

/// Gray color of equal luminance, alpha unchanged
pub fn to_grayscale(color: Rgba) -> Rgba {
    let l = luminance(color.r, color.g, color.b);
    Rgba::new(l, l, l, color.a)
}

/// The style's color, converted to gray when `convert_to_gray` is set
///
/// The flag comes from the style that owns the reference, not from the color style itself.
pub fn resolve_color(style: &ColorStyle, convert_to_gray: bool) -> Rgba {
    let color = style.read().color;
    if convert_to_gray {
        to_grayscale(color)
    } else {
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ColorProps;

    #[test]
    fn test_grayscale_sky_blue() {
        // 30 + 88 + 22
        let gray = to_grayscale(Rgba::new(100, 150, 200, 255));
        assert_eq!(gray, Rgba::new(140, 140, 140, 255));
    }

    #[test]
    fn test_grayscale_keeps_alpha_and_clamps() {
        assert_eq!(
            to_grayscale(Rgba::new(255, 255, 255, 7)),
            Rgba::new(255, 255, 255, 7)
        );
        assert_eq!(luminance(0, 0, 0), 0);
    }

    #[test]
    fn test_resolve_color_honors_flag() {
        let style = ColorStyle::new("Sky", ColorProps::new(Rgba::new(100, 150, 200, 255)));
        assert_eq!(resolve_color(&style, false), Rgba::new(100, 150, 200, 255));
        assert_eq!(resolve_color(&style, true), Rgba::new(140, 140, 140, 255));
    }
}
