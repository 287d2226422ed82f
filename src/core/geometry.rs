//! Plane geometry helpers shared by cap shapes, brush transforms and cap bounds.
//!
//! Coordinates are y-down drawing units; positive angles turn clockwise on screen.

use serde::{Deserialize, Serialize};
use tiny_skia::{Point, Transform};

/// Axis-aligned rectangle in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing every point; empty input gives the zero rectangle.
    pub fn from_points(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::from_xy(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Shape angles are stored in tenths of a degree.
pub fn tenths_to_degrees(tenths: i32) -> f32 {
    tenths as f32 / 10.0
}

/// Sine and cosine of an angle in degrees.
///
/// Quarter turns return exact values so that rotated geometry stays on whole units.
pub fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        normalized.to_radians().sin_cos()
    }
}

/// Rotation about the origin.
pub fn rotation(degrees: f32) -> Transform {
    let (sin, cos) = sin_cos_degrees(degrees);
    Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0)
}

/// Rotation about `center`.
pub fn rotation_at(degrees: f32, center: Point) -> Transform {
    Transform::from_translate(-center.x, -center.y)
        .post_concat(rotation(degrees))
        .post_translate(center.x, center.y)
}

/// Applies `transform` to a single point.
pub fn transform_point(transform: &Transform, point: Point) -> Point {
    Point::from_xy(
        transform.sx * point.x + transform.kx * point.y + transform.tx,
        transform.ky * point.x + transform.sy * point.y + transform.ty,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let points = [
            Point::from_xy(-5.0, -10.0),
            Point::from_xy(0.0, 0.0),
            Point::from_xy(5.0, -10.0),
        ];
        assert_eq!(
            Bounds::from_points(&points),
            Bounds::new(-5.0, -10.0, 10.0, 10.0)
        );
        assert_eq!(Bounds::from_points(&[]), Bounds::default());
        assert!(Bounds::from_points(&[]).is_empty());
    }

    #[test]
    fn test_quarter_turns_are_exact() {
        let t = rotation(90.0);
        assert_eq!(
            transform_point(&t, Point::from_xy(1.0, 0.0)),
            Point::from_xy(0.0, 1.0)
        );
        let t = rotation(-90.0);
        assert_eq!(
            transform_point(&t, Point::from_xy(1.0, 0.0)),
            Point::from_xy(0.0, -1.0)
        );
        assert_eq!(sin_cos_degrees(540.0), (0.0, -1.0));
    }

    #[test]
    fn test_rotation_at_keeps_center_fixed() {
        let center = Point::from_xy(50.0, 20.0);
        let t = rotation_at(37.0, center);
        let p = transform_point(&t, center);
        assert!((p.x - 50.0).abs() < 1e-4);
        assert!((p.y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_tenths_to_degrees() {
        assert_eq!(tenths_to_degrees(900), 90.0);
        assert_eq!(tenths_to_degrees(-15), -1.5);
    }
}
