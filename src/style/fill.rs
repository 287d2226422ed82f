use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tiny_skia::{ColorU8, IntSize, Pixmap};

use super::{ColorStyle, Style};
use crate::core::errors::{ToolError, ToolResult};

/// Decoded image shared between fill styles and texture brushes (premultiplied RGBA)
pub type ImageHandle = Arc<Pixmap>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FillMode {
    #[default]
    Solid,
    Pattern,
    Gradient,
    Image,
    /// Mode written by a newer producer
    #[serde(other)]
    Unknown,
}

/// 8x8 hatch patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HatchStyle {
    #[default]
    Horizontal,
    Vertical,
    ForwardDiagonal,
    BackwardDiagonal,
    Cross,
    DiagonalCross,
}

/// How an image is placed inside a shape's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageLayout {
    #[default]
    Original,
    Center,
    Stretch,
    Fit,
    Tile,
}

#[derive(Debug, Clone)]
pub struct FillProps {
    pub base_color_style: Arc<ColorStyle>,
    pub additional_color_style: Arc<ColorStyle>,
    pub fill_mode: FillMode,
    pub fill_pattern: HatchStyle,
    /// Gradient direction in degrees
    pub gradient_angle: i32,
    pub convert_to_grayscale: bool,
    pub image: Option<ImageHandle>,
    pub image_layout: ImageLayout,
    pub image_gamma_correction: f32,
    /// Image transparency in percent (0 = opaque)
    pub image_transparency: u8,
}

impl FillProps {
    /// Solid fill with the base color
    pub fn solid(base_color_style: Arc<ColorStyle>) -> Self {
        Self {
            additional_color_style: Arc::clone(&base_color_style),
            base_color_style,
            fill_mode: FillMode::Solid,
            fill_pattern: HatchStyle::default(),
            gradient_angle: 0,
            convert_to_grayscale: false,
            image: None,
            image_layout: ImageLayout::default(),
            image_gamma_correction: 1.0,
            image_transparency: 0,
        }
    }

    /// Gradient from the additional color to the base color
    pub fn gradient(
        base_color_style: Arc<ColorStyle>,
        additional_color_style: Arc<ColorStyle>,
        gradient_angle: i32,
    ) -> Self {
        Self {
            additional_color_style,
            fill_mode: FillMode::Gradient,
            gradient_angle,
            ..Self::solid(base_color_style)
        }
    }

    /// Hatch pattern in the base color over the additional color
    pub fn pattern(
        base_color_style: Arc<ColorStyle>,
        additional_color_style: Arc<ColorStyle>,
        fill_pattern: HatchStyle,
    ) -> Self {
        Self {
            additional_color_style,
            fill_mode: FillMode::Pattern,
            fill_pattern,
            ..Self::solid(base_color_style)
        }
    }

    /// Image fill; the colors are kept for when the image is removed
    pub fn image(
        base_color_style: Arc<ColorStyle>,
        image: Option<ImageHandle>,
        image_layout: ImageLayout,
    ) -> Self {
        Self {
            fill_mode: FillMode::Image,
            image,
            image_layout,
            ..Self::solid(base_color_style)
        }
    }
}

pub type FillStyle = Style<FillProps>;

/// Decode an image file for use as a fill
pub fn load_image(path: impl AsRef<Path>) -> ToolResult<ImageHandle> {
    let path = path.as_ref();
    let decoded = image::open(path)?.to_rgba8();
    tracing::debug!(
        "Loaded fill image {:?} ({}x{})",
        path,
        decoded.width(),
        decoded.height()
    );
    image_from_rgba(decoded)
}

/// Convert a straight-alpha RGBA image into a premultiplied pixmap
pub fn image_from_rgba(image: image::RgbaImage) -> ToolResult<ImageHandle> {
    let (width, height) = image.dimensions();
    let size = IntSize::from_wh(width, height).ok_or_else(|| {
        ToolError::InvalidArgument(format!("image size {}x{} is empty", width, height))
    })?;

    let mut data = image.into_raw();
    for px in data.chunks_exact_mut(4) {
        let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        px.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let pixmap = Pixmap::from_vec(data, size)
        .ok_or_else(|| ToolError::InvalidArgument("image data does not match its size".into()))?;
    Ok(Arc::new(pixmap))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_image_from_rgba_premultiplies() {
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([200, 100, 0, 0]));
        let pixmap = image_from_rgba(img).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (2, 3));
        assert!(pixmap.pixels().iter().all(|p| p.red() == 0 && p.alpha() == 0));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let img = image::RgbaImage::new(0, 4);
        assert!(matches!(
            image_from_rgba(img),
            Err(ToolError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_load_missing_image_fails() {
        assert!(load_image("/nonexistent/fill.png").is_err());
    }

    #[test]
    fn test_unknown_fill_mode_deserializes() {
        let mode: FillMode = serde_json::from_str("\"Hologram\"").unwrap();
        assert_eq!(mode, FillMode::Unknown);
    }
}
