//! Fill tools
//!
//! A `Brush` owns everything its shader needs. The only mutable part is the
//! transform, which `ToolCache::get_transformed_brush` repositions for each
//! shape the cached brush is used on.

use parking_lot::Mutex;
use std::sync::Arc;
use tiny_skia::{
    FilterQuality, GradientStop, LinearGradient, Paint, Pattern, Pixmap, Point, Shader,
    SpreadMode, Transform,
};

use super::color::luminance;
use crate::core::errors::{ToolError, ToolResult};
use crate::core::geometry::{rotation_at, sin_cos_degrees, Bounds};
use crate::style::{HatchStyle, ImageLayout, Rgba};

/// Edge length of a hatch tile in pixels
pub const HATCH_TILE_SIZE: u32 = 8;

/// Size of the rectangle gradient brushes are built for
pub const GRADIENT_UNIT_SIZE: f32 = 100.0;

#[derive(Debug)]
pub enum BrushKind {
    Solid(Rgba),
    Hatch {
        style: HatchStyle,
        fore: Rgba,
        back: Rgba,
        tile: Pixmap,
    },
    LinearGradient {
        rect: Bounds,
        start_color: Rgba,
        end_color: Rgba,
        /// Degrees, clockwise
        angle: f32,
    },
    Texture {
        texture: Pixmap,
        attributes: Arc<ImageAttributes>,
    },
}

#[derive(Debug)]
pub struct Brush {
    kind: BrushKind,
    transform: Mutex<Transform>,
}

impl Brush {
    fn with_kind(kind: BrushKind) -> Self {
        Self {
            kind,
            transform: Mutex::new(Transform::identity()),
        }
    }

    pub fn solid(color: Rgba) -> Self {
        Self::with_kind(BrushKind::Solid(color))
    }

    /// Hatch in `fore` over `back`
    pub fn hatch(style: HatchStyle, fore: Rgba, back: Rgba) -> ToolResult<Self> {
        let tile = hatch_tile(style, fore, back)?;
        Ok(Self::with_kind(BrushKind::Hatch {
            style,
            fore,
            back,
            tile,
        }))
    }

    /// Gradient across `rect` at `angle` degrees
    pub fn linear_gradient(rect: Bounds, start_color: Rgba, end_color: Rgba, angle: f32) -> Self {
        Self::with_kind(BrushKind::LinearGradient {
            rect,
            start_color,
            end_color,
            angle,
        })
    }

    /// Texture at the image's native size, adjusted by `attributes`
    pub fn texture(image: &Pixmap, attributes: Arc<ImageAttributes>) -> Self {
        let texture = attributes.apply(image);
        Self::with_kind(BrushKind::Texture {
            texture,
            attributes,
        })
    }

    pub fn kind(&self) -> &BrushKind {
        &self.kind
    }

    pub fn is_texture(&self) -> bool {
        matches!(self.kind, BrushKind::Texture { .. })
    }

    pub fn transform(&self) -> Transform {
        *self.transform.lock()
    }

    pub fn set_transform(&self, transform: Transform) {
        *self.transform.lock() = transform;
    }

    pub fn reset_transform(&self) {
        self.set_transform(Transform::identity());
    }

    /// Place the brush on a shape
    ///
    /// `bounds` is the shape's unrotated bounding box, `degrees` the shape's
    /// rotation about `center`. Solid and hatch brushes are left as they are.
    pub fn fit_to_shape(&self, bounds: Bounds, center: Point, degrees: f32) {
        let placement = match &self.kind {
            BrushKind::Solid(_) | BrushKind::Hatch { .. } => return,
            BrushKind::LinearGradient { rect, angle, .. } => {
                gradient_placement(*rect, bounds, *angle)
            }
            BrushKind::Texture {
                texture,
                attributes,
            } => texture_placement(
                attributes.layout(),
                texture.width() as f32,
                texture.height() as f32,
                bounds,
            ),
        };
        self.set_transform(placement.post_concat(rotation_at(degrees, center)));
    }

    /// Shader using the current transform
    pub fn shader(&self) -> Shader<'_> {
        let transform = self.transform();
        match &self.kind {
            BrushKind::Solid(color) => Shader::SolidColor(color.to_skia()),
            BrushKind::Hatch { tile, .. } => Pattern::new(
                tile.as_ref(),
                SpreadMode::Repeat,
                FilterQuality::Nearest,
                1.0,
                transform,
            ),
            BrushKind::LinearGradient {
                rect,
                start_color,
                end_color,
                angle,
            } => {
                let (start, end) = gradient_line(*rect, *angle);
                LinearGradient::new(
                    start,
                    end,
                    vec![
                        GradientStop::new(0.0, start_color.to_skia()),
                        GradientStop::new(1.0, end_color.to_skia()),
                    ],
                    SpreadMode::Pad,
                    transform,
                )
                .unwrap_or(Shader::SolidColor(end_color.to_skia()))
            }
            BrushKind::Texture {
                texture,
                attributes,
            } => {
                let spread = match attributes.layout() {
                    ImageLayout::Tile => SpreadMode::Repeat,
                    _ => SpreadMode::Pad,
                };
                Pattern::new(
                    texture.as_ref(),
                    spread,
                    FilterQuality::Bilinear,
                    1.0,
                    transform,
                )
            }
        }
    }

    pub fn paint(&self) -> Paint<'_> {
        Paint {
            shader: self.shader(),
            anti_alias: true,
            ..Paint::default()
        }
    }
}

/// Start and end of the gradient axis through the center of `rect`
///
/// The axis is long enough that both corners perpendicular to it get the
/// pure end colors.
pub fn gradient_line(rect: Bounds, angle: f32) -> (Point, Point) {
    let (sin, cos) = sin_cos_degrees(angle);
    let center = rect.center();
    let half = (rect.width / 2.0 * cos).abs() + (rect.height / 2.0 * sin).abs();
    (
        Point::from_xy(center.x - cos * half, center.y - sin * half),
        Point::from_xy(center.x + cos * half, center.y + sin * half),
    )
}

/// Map the gradient axis of `rect` onto the axis `bounds` has at `angle`
///
/// The scale is uniform so the axis keeps its direction on non-square shapes.
fn gradient_placement(rect: Bounds, bounds: Bounds, angle: f32) -> Transform {
    let length = |(start, end): (Point, Point)| (end.x - start.x).hypot(end.y - start.y);
    let scale =
        length(gradient_line(bounds, angle)) / length(gradient_line(rect, angle)).max(f32::EPSILON);
    let (from, to) = (rect.center(), bounds.center());
    Transform::from_translate(-from.x, -from.y)
        .post_scale(scale, scale)
        .post_translate(to.x, to.y)
}

fn texture_placement(layout: ImageLayout, width: f32, height: f32, bounds: Bounds) -> Transform {
    match layout {
        ImageLayout::Original | ImageLayout::Tile => Transform::from_translate(bounds.x, bounds.y),
        ImageLayout::Center => Transform::from_translate(
            bounds.x + (bounds.width - width) / 2.0,
            bounds.y + (bounds.height - height) / 2.0,
        ),
        ImageLayout::Stretch => Transform::from_scale(bounds.width / width, bounds.height / height)
            .post_translate(bounds.x, bounds.y),
        ImageLayout::Fit => {
            let scale = (bounds.width / width).min(bounds.height / height);
            Transform::from_scale(scale, scale).post_translate(
                bounds.x + (bounds.width - width * scale) / 2.0,
                bounds.y + (bounds.height - height * scale) / 2.0,
            )
        }
    }
}

fn hatch_tile(style: HatchStyle, fore: Rgba, back: Rgba) -> ToolResult<Pixmap> {
    let mut tile = Pixmap::new(HATCH_TILE_SIZE, HATCH_TILE_SIZE)
        .ok_or_else(|| ToolError::InvalidArgument("hatch tile size".into()))?;
    let last = HATCH_TILE_SIZE - 1;
    let (fore, back) = (fore.premultiplied(), back.premultiplied());

    for (i, px) in tile.pixels_mut().iter_mut().enumerate() {
        let x = i as u32 % HATCH_TILE_SIZE;
        let y = i as u32 / HATCH_TILE_SIZE;
        let on = match style {
            HatchStyle::Horizontal => y == 0,
            HatchStyle::Vertical => x == 0,
            HatchStyle::ForwardDiagonal => x == y,
            HatchStyle::BackwardDiagonal => x + y == last,
            HatchStyle::Cross => x == 0 || y == 0,
            HatchStyle::DiagonalCross => x == y || x + y == last,
        };
        *px = if on { fore } else { back };
    }

    Ok(tile)
}

/// Image adjustments applied when a texture brush is built
#[derive(Debug, Clone)]
pub struct ImageAttributes {
    layout: ImageLayout,
    gamma: f32,
    transparency: u8,
    grayscale: bool,
    gamma_table: [u8; 256],
}

impl ImageAttributes {
    /// `transparency` is in percent and saturates at 100; non-positive gamma means no correction
    pub fn new(layout: ImageLayout, gamma: f32, transparency: u8, grayscale: bool) -> Self {
        let gamma = if gamma.is_finite() && gamma > 0.0 {
            gamma
        } else {
            1.0
        };

        let mut gamma_table = [0u8; 256];
        for (i, v) in gamma_table.iter_mut().enumerate() {
            *v = ((i as f32 / 255.0).powf(gamma) * 255.0).round() as u8;
        }

        Self {
            layout,
            gamma,
            transparency: transparency.min(100),
            grayscale,
            gamma_table,
        }
    }

    pub fn layout(&self) -> ImageLayout {
        self.layout
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn transparency(&self) -> u8 {
        self.transparency
    }

    pub fn grayscale(&self) -> bool {
        self.grayscale
    }

    fn is_identity(&self) -> bool {
        self.gamma == 1.0 && self.transparency == 0 && !self.grayscale
    }

    /// Adjusted copy of `image`
    pub fn apply(&self, image: &Pixmap) -> Pixmap {
        let mut out = image.clone();
        if self.is_identity() {
            return out;
        }

        let opacity = (100 - self.transparency) as f32 / 100.0;
        for px in out.pixels_mut() {
            let c = px.demultiply();
            let (mut r, mut g, mut b) = (
                self.gamma_table[c.red() as usize],
                self.gamma_table[c.green() as usize],
                self.gamma_table[c.blue() as usize],
            );
            if self.grayscale {
                let l = luminance(r, g, b);
                (r, g, b) = (l, l, l);
            }
            let a = (c.alpha() as f32 * opacity).round() as u8;
            *px = Rgba::new(r, g, b, a).premultiplied();
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::core::geometry::transform_point;

    fn checker() -> Pixmap {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(100, 150, 200, 255));
        pixmap
    }

    #[test]
    fn test_hatch_tile_patterns() {
        let brush = Brush::hatch(HatchStyle::Cross, Rgba::BLACK, Rgba::WHITE).unwrap();
        let BrushKind::Hatch { tile, .. } = brush.kind() else {
            panic!("expected hatch");
        };
        assert_eq!((tile.width(), tile.height()), (8, 8));
        let px = tile.pixels();
        assert_eq!(px[0], Rgba::BLACK.premultiplied());
        assert_eq!(px[3], Rgba::BLACK.premultiplied());
        assert_eq!(px[8 * 3], Rgba::BLACK.premultiplied());
        assert_eq!(px[8 * 3 + 3], Rgba::WHITE.premultiplied());
    }

    #[test]
    fn test_gradient_line_horizontal_and_diagonal() {
        let rect = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let (start, end) = gradient_line(rect, 0.0);
        assert_eq!(start, Point::from_xy(0.0, 50.0));
        assert_eq!(end, Point::from_xy(100.0, 50.0));

        let (start, end) = gradient_line(rect, 90.0);
        assert_eq!(start, Point::from_xy(50.0, 0.0));
        assert_eq!(end, Point::from_xy(50.0, 100.0));
    }

    #[test]
    fn test_fit_to_shape_moves_gradient() {
        let brush = Brush::linear_gradient(
            Bounds::new(0.0, 0.0, GRADIENT_UNIT_SIZE, GRADIENT_UNIT_SIZE),
            Rgba::WHITE,
            Rgba::BLACK,
            0.0,
        );
        brush.fit_to_shape(
            Bounds::new(10.0, 20.0, 200.0, 50.0),
            Point::from_xy(110.0, 45.0),
            0.0,
        );
        let ts = brush.transform();
        assert_eq!((ts.sx, ts.sy), (2.0, 2.0));
        assert_eq!((ts.tx, ts.ty), (10.0, -55.0));

        // The axis now runs across the middle of the shape
        let (start, end) = gradient_line(Bounds::new(0.0, 0.0, 100.0, 100.0), 0.0);
        assert_eq!(transform_point(&ts, start), Point::from_xy(10.0, 45.0));
        assert_eq!(transform_point(&ts, end), Point::from_xy(210.0, 45.0));

        brush.reset_transform();
        assert!(brush.transform().is_identity());
    }

    #[test]
    fn test_gradient_keeps_angle_on_wide_shape() {
        let unit = Bounds::new(0.0, 0.0, GRADIENT_UNIT_SIZE, GRADIENT_UNIT_SIZE);
        let brush = Brush::linear_gradient(unit, Rgba::WHITE, Rgba::BLACK, 45.0);
        let bounds = Bounds::new(0.0, 0.0, 200.0, 100.0);
        brush.fit_to_shape(bounds, bounds.center(), 0.0);

        let ts = brush.transform();
        let (start, end) = gradient_line(unit, 45.0);
        let (start, end) = (transform_point(&ts, start), transform_point(&ts, end));
        let degrees = (end.y - start.y).atan2(end.x - start.x).to_degrees();
        assert!((degrees - 45.0).abs() < 1e-3, "axis at {} degrees", degrees);

        // Both ends land on the axis laid out across the shape
        let (want_start, want_end) = gradient_line(bounds, 45.0);
        assert!((start.x - want_start.x).abs() < 1e-3 && (start.y - want_start.y).abs() < 1e-3);
        assert!((end.x - want_end.x).abs() < 1e-3 && (end.y - want_end.y).abs() < 1e-3);
    }

    #[test]
    fn test_solid_brush_ignores_placement() {
        let brush = Brush::solid(Rgba::BLACK);
        brush.fit_to_shape(Bounds::new(5.0, 5.0, 10.0, 10.0), Point::zero(), 45.0);
        assert!(brush.transform().is_identity());
    }

    #[test]
    fn test_texture_fit_layout_centers_image() {
        let attributes = Arc::new(ImageAttributes::new(ImageLayout::Fit, 1.0, 0, false));
        let brush = Brush::texture(&checker(), attributes);
        brush.fit_to_shape(Bounds::new(0.0, 0.0, 10.0, 4.0), Point::zero(), 0.0);
        let ts = brush.transform();
        assert_eq!((ts.sx, ts.sy), (2.0, 2.0));
        assert_eq!((ts.tx, ts.ty), (3.0, 0.0));
    }

    #[test]
    fn test_image_attributes_transparency_and_gray() {
        let attributes = ImageAttributes::new(ImageLayout::Original, 1.0, 50, true);
        let out = attributes.apply(&checker());
        let c = out.pixels()[0].demultiply();
        assert_eq!(c.alpha(), 128);
        assert_eq!(c.red(), c.green());
        assert_eq!(c.green(), c.blue());
    }

    #[test]
    fn test_identity_attributes_copy_image() {
        let attributes = ImageAttributes::new(ImageLayout::Tile, 0.0, 0, false);
        assert_eq!(attributes.gamma(), 1.0);
        let image = checker();
        assert_eq!(attributes.apply(&image).data(), image.data());
    }
}
