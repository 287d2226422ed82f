//! Line cap outlines
//!
//! Caps are described in a local frame whose origin is the line end point.
//! The line arrives from negative y, so a cap extends towards -y.

use tiny_skia::Point;

use super::path::ShapePath;
use crate::core::errors::{ToolError, ToolResult};
use crate::style::CapShape;

/// Build the outline of a cap of the given size.
///
/// `CapShape::None` yields an empty path.
pub fn build_cap_shape(shape: CapShape, size: u32) -> ToolResult<ShapePath> {
    let s = size as f32;
    let h = s / 2.0;
    let mut path = ShapePath::new();

    match shape {
        CapShape::None => {}
        CapShape::ArrowClosed => {
            path.add_polygon(&[
                Point::from_xy(-h, -s),
                Point::from_xy(0.0, 0.0),
                Point::from_xy(h, -s),
            ]);
        }
        CapShape::ArrowOpen => {
            path.start_figure();
            path.add_line(0.0, 0.0, -h, -s);
            path.add_line(-h + 1.0, -s, 0.0, 1.0);
            path.add_line(0.0, 1.0, h + 1.0, -s);
            path.add_line(h, -s, 0.0, 0.0);
            path.close_figure();
        }
        CapShape::Triangle => {
            path.add_polygon(&[
                Point::from_xy(0.0, -s),
                Point::from_xy(-h, 0.0),
                Point::from_xy(h, 0.0),
            ]);
        }
        CapShape::Circle => path.add_ellipse(-h, -s, s, s),
        CapShape::Square => path.add_rect(-h, -s, s, s),
        CapShape::Diamond => {
            path.add_polygon(&[
                Point::from_xy(0.0, 0.0),
                Point::from_xy(-h, -h),
                Point::from_xy(0.0, -s),
                Point::from_xy(h, -h),
            ]);
        }
        CapShape::CenteredCircle => path.add_ellipse(-h, -h, s, s),
        CapShape::CenteredHalfCircle => {
            path.start_figure();
            path.add_arc(-h, -h, s, s, 0.0, -180.0);
            path.add_line(-h, 0.0, -h - 1.0, 0.0);
            path.add_arc(-h - 1.0, -h - 1.0, s + 2.0, s + 2.0, 180.0, 180.0);
            path.add_line(h + 1.0, 0.0, h, 0.0);
            path.close_figure();
        }
        CapShape::Unknown => return Err(ToolError::unsupported("cap shape", shape)),
    }

    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::core::geometry::Bounds;

    #[test]
    fn test_arrow_closed_outline() {
        let path = build_cap_shape(CapShape::ArrowClosed, 10).unwrap();
        assert_eq!(
            path.points(),
            vec![
                Point::from_xy(-5.0, -10.0),
                Point::from_xy(0.0, 0.0),
                Point::from_xy(5.0, -10.0),
            ]
        );
        assert_eq!(path.bounds(), Bounds::new(-5.0, -10.0, 10.0, 10.0));
    }

    #[test]
    fn test_arrow_open_has_notch() {
        let path = build_cap_shape(CapShape::ArrowOpen, 10).unwrap();
        let points = path.points();
        assert_eq!(points.len(), 7);
        assert!(points.contains(&Point::from_xy(0.0, 1.0)));
        assert_eq!(path.bounds(), Bounds::new(-5.0, -10.0, 11.0, 11.0));
    }

    #[test]
    fn test_centered_shapes_straddle_line_end() {
        let circle = build_cap_shape(CapShape::CenteredCircle, 8).unwrap();
        assert_eq!(circle.bounds(), Bounds::new(-4.0, -4.0, 8.0, 8.0));

        let half = build_cap_shape(CapShape::CenteredHalfCircle, 8).unwrap();
        let b = half.bounds();
        assert_eq!((b.x, b.y, b.width), (-5.0, -5.0, 10.0));
        assert_eq!(b.bottom(), 0.0);
    }

    #[test]
    fn test_square_and_diamond_extent() {
        let square = build_cap_shape(CapShape::Square, 6).unwrap();
        assert_eq!(square.bounds(), Bounds::new(-3.0, -6.0, 6.0, 6.0));

        let diamond = build_cap_shape(CapShape::Diamond, 6).unwrap();
        assert_eq!(diamond.bounds(), Bounds::new(-3.0, -6.0, 6.0, 6.0));

        let triangle = build_cap_shape(CapShape::Triangle, 6).unwrap();
        assert_eq!(triangle.bounds(), Bounds::new(-3.0, -6.0, 6.0, 6.0));
    }

    #[test]
    fn test_none_is_empty_and_unknown_fails() {
        assert!(build_cap_shape(CapShape::None, 10).unwrap().is_empty());
        assert!(matches!(
            build_cap_shape(CapShape::Unknown, 10),
            Err(ToolError::UnsupportedValue { .. })
        ));
    }
}
