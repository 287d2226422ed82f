//! Figure-based path geometry
//!
//! `ShapePath` collects figures the way shape outlines are described: lines and
//! arcs appended to the current figure are joined to it, while rectangles and
//! ellipses always form their own closed figure. Arcs are approximated by
//! cubic segments of at most a quarter turn.

use std::fmt;
use tiny_skia::{PathBuilder, Point, Transform};

use crate::core::geometry::{sin_cos_degrees, transform_point, Bounds};

/// A path element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    /// Start of a new figure
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bezier curve (control 1, control 2, end)
    CubicTo(Point, Point, Point),
    /// Close the current figure
    Close,
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            PathElement::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            PathElement::CubicTo(c1, c2, p) => {
                write!(f, "C {} {} {} {} {} {}", c1.x, c1.y, c2.x, c2.y, p.x, p.y)
            }
            PathElement::Close => write!(f, "Z"),
        }
    }
}

/// Outline made of one or more figures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapePath {
    elements: Vec<PathElement>,
    /// Last point of the open figure, `None` when the next segment starts a new figure
    current: Option<Point>,
}

impl ShapePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// End the current figure without closing it.
    pub fn start_figure(&mut self) {
        self.current = None;
    }

    /// Close the current figure.
    pub fn close_figure(&mut self) {
        if self.current.is_some() {
            self.elements.push(PathElement::Close);
            self.current = None;
        }
    }

    /// Append a line to the current figure.
    ///
    /// The line is joined to the figure's last point when it does not start there.
    pub fn add_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.connect(Point::from_xy(x1, y1));
        self.push_line(Point::from_xy(x2, y2));
    }

    /// Append a polyline to the current figure.
    pub fn add_lines(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.connect(*first);
        for p in rest {
            self.push_line(*p);
        }
    }

    /// Append a closed polygon as its own figure.
    pub fn add_polygon(&mut self, points: &[Point]) {
        if points.is_empty() {
            return;
        }
        self.start_figure();
        self.add_lines(points);
        self.close_figure();
    }

    /// Append a closed rectangle as its own figure.
    pub fn add_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.add_polygon(&[
            Point::from_xy(x, y),
            Point::from_xy(x + width, y),
            Point::from_xy(x + width, y + height),
            Point::from_xy(x, y + height),
        ]);
    }

    /// Append a closed ellipse inscribed in the rectangle as its own figure.
    pub fn add_ellipse(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.start_figure();
        self.add_arc(x, y, width, height, 0.0, 360.0);
        self.close_figure();
    }

    /// Append an elliptical arc to the current figure.
    ///
    /// Angles are in degrees, clockwise from the positive x axis; a negative
    /// sweep runs counter-clockwise.
    pub fn add_arc(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        start_angle: f32,
        sweep_angle: f32,
    ) {
        let rx = width / 2.0;
        let ry = height / 2.0;
        let center = Point::from_xy(x + rx, y + ry);
        let on_arc = |angle: f32| {
            let (sin, cos) = sin_cos_degrees(angle);
            Point::from_xy(center.x + rx * cos, center.y + ry * sin)
        };
        let tangent = |angle: f32| {
            let (sin, cos) = sin_cos_degrees(angle);
            Point::from_xy(-rx * sin, ry * cos)
        };

        self.connect(on_arc(start_angle));

        let segments = (sweep_angle.abs() / 90.0).ceil().max(1.0) as usize;
        let step = sweep_angle / segments as f32;
        let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan();

        let mut a0 = start_angle;
        for _ in 0..segments {
            let a1 = a0 + step;
            let (p0, p3) = (on_arc(a0), on_arc(a1));
            let (t0, t1) = (tangent(a0), tangent(a1));
            let c1 = Point::from_xy(p0.x + k * t0.x, p0.y + k * t0.y);
            let c2 = Point::from_xy(p3.x - k * t1.x, p3.y - k * t1.y);
            self.elements.push(PathElement::CubicTo(c1, c2, p3));
            self.current = Some(p3);
            a0 = a1;
        }
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// All points in drawing order, curve control points included.
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.elements.len() * 3);
        for el in &self.elements {
            match el {
                PathElement::MoveTo(p) | PathElement::LineTo(p) => points.push(*p),
                PathElement::CubicTo(c1, c2, p) => points.extend([*c1, *c2, *p]),
                PathElement::Close => {}
            }
        }
        points
    }

    /// Bounding box of all points; control points lie on or inside the curve hull.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.points())
    }

    /// Transform the path in place.
    pub fn transform(&mut self, ts: Transform) {
        let map = |p: &mut Point| *p = transform_point(&ts, *p);
        for el in &mut self.elements {
            match el {
                PathElement::MoveTo(p) | PathElement::LineTo(p) => map(p),
                PathElement::CubicTo(c1, c2, p) => {
                    map(c1);
                    map(c2);
                    map(p);
                }
                PathElement::Close => {}
            }
        }
        if let Some(p) = self.current.as_mut() {
            map(p);
        }
    }

    /// Transformed copy of the path.
    pub fn transformed(&self, ts: Transform) -> Self {
        let mut path = self.clone();
        path.transform(ts);
        path
    }

    /// Convert to a tiny-skia path; `None` for paths without any area or length.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::with_capacity(self.elements.len(), self.elements.len() * 3);
        for el in &self.elements {
            match el {
                PathElement::MoveTo(p) => pb.move_to(p.x, p.y),
                PathElement::LineTo(p) => pb.line_to(p.x, p.y),
                PathElement::CubicTo(c1, c2, p) => pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathElement::Close => pb.close(),
            }
        }
        pb.finish()
    }

    fn connect(&mut self, start: Point) {
        match self.current {
            None => {
                self.elements.push(PathElement::MoveTo(start));
                self.current = Some(start);
            }
            Some(current) if current != start => self.push_line(start),
            Some(_) => {}
        }
    }

    fn push_line(&mut self, p: Point) {
        self.elements.push(PathElement::LineTo(p));
        self.current = Some(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line_joins_figure() {
        let mut path = ShapePath::new();
        path.add_line(0.0, 0.0, 10.0, 0.0);
        path.add_line(10.0, 0.0, 10.0, 10.0);
        path.add_line(0.0, 10.0, 0.0, 0.0);
        path.close_figure();

        assert_eq!(
            path.elements(),
            &[
                PathElement::MoveTo(Point::from_xy(0.0, 0.0)),
                PathElement::LineTo(Point::from_xy(10.0, 0.0)),
                PathElement::LineTo(Point::from_xy(10.0, 10.0)),
                PathElement::LineTo(Point::from_xy(0.0, 10.0)),
                PathElement::LineTo(Point::from_xy(0.0, 0.0)),
                PathElement::Close,
            ]
        );
    }

    #[test]
    fn test_ellipse_bounds_match_rect() {
        let mut path = ShapePath::new();
        path.add_ellipse(-5.0, -10.0, 10.0, 10.0);

        assert_eq!(path.points().len(), 13);
        assert_eq!(path.bounds(), Bounds::new(-5.0, -10.0, 10.0, 10.0));
        assert_eq!(path.elements().last(), Some(&PathElement::Close));
    }

    #[test]
    fn test_arc_ends_on_quadrant_points() {
        let mut path = ShapePath::new();
        path.add_arc(-2.0, -2.0, 4.0, 4.0, 0.0, -180.0);

        let points = path.points();
        assert_eq!(points.first(), Some(&Point::from_xy(2.0, 0.0)));
        assert_eq!(points.last(), Some(&Point::from_xy(-2.0, 0.0)));
        // Counter-clockwise from the right passes through the top
        assert!(points.contains(&Point::from_xy(0.0, -2.0)));
    }

    #[test]
    fn test_rect_is_own_figure() {
        let mut path = ShapePath::new();
        path.add_line(0.0, 0.0, 1.0, 1.0);
        path.add_rect(2.0, 2.0, 3.0, 4.0);

        assert!(matches!(path.elements()[2], PathElement::MoveTo(_)));
        assert_eq!(path.bounds(), Bounds::new(0.0, 0.0, 5.0, 6.0));
    }

    #[test]
    fn test_transform_scales_points() {
        let mut path = ShapePath::new();
        path.add_rect(-1.0, -2.0, 2.0, 2.0);
        path.transform(Transform::from_scale(0.5, 0.5));
        assert_eq!(path.bounds(), Bounds::new(-0.5, -1.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_path_has_no_skia_path() {
        assert!(ShapePath::new().to_skia().is_none());
        let mut path = ShapePath::new();
        path.add_rect(0.0, 0.0, 4.0, 4.0);
        assert!(path.to_skia().is_some());
    }
}
