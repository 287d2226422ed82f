//! Raster surface that draws with cached tools
//!
//! `Canvas` is the consumer side of the cache: it fills shape paths with
//! brushes and strokes polylines with pens, drawing custom caps at the line
//! ends. Finished pixmaps are handed to an [`ImageSink`].

use tiny_skia::{FillRule, Pixmap, Point, Transform};

use crate::core::errors::{ToolError, ToolResult};
use crate::core::geometry::rotation;
use crate::style::Rgba;
use crate::tools::{Brush, CustomLineCap, Pen, ShapePath};

pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Transparent canvas
    pub fn new(width: u32, height: u32) -> ToolResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ToolError::InvalidArgument(format!("canvas size {}x{} is empty", width, height))
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(color.to_skia());
    }

    /// Fill a shape outline; empty paths draw nothing
    pub fn fill_path(&mut self, path: &ShapePath, brush: &Brush) {
        let Some(path) = path.to_skia() else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &brush.paint(),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Stroke a polyline, then draw the pen's custom caps at both ends
    pub fn stroke_polyline(&mut self, points: &[Point], pen: &Pen) {
        if points.len() < 2 {
            return;
        }

        let mut line = ShapePath::new();
        line.add_lines(points);
        let Some(path) = line.to_skia() else {
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &pen.paint(),
            pen.stroke(),
            Transform::identity(),
            None,
        );

        let n = points.len();
        if let Some(cap) = pen.start_cap().custom_cap() {
            self.draw_cap(cap, pen, points[1], points[0]);
        }
        if let Some(cap) = pen.end_cap().custom_cap() {
            self.draw_cap(cap, pen, points[n - 2], points[n - 1]);
        }
    }

    /// Cap geometry points along -y towards the line, so +y is turned onto the
    /// segment direction
    fn draw_cap(&mut self, cap: &CustomLineCap, pen: &Pen, from: Point, tip: Point) {
        let (dx, dy) = (tip.x - from.x, tip.y - from.y);
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let degrees = dy.atan2(dx).to_degrees() - 90.0;
        let scale = pen.width() * cap.width_scale();
        let ts = Transform::from_scale(scale, scale)
            .post_concat(rotation(degrees))
            .post_translate(tip.x, tip.y);

        if let Some(path) = cap.path().transformed(ts).to_skia() {
            self.pixmap.fill_path(
                &path,
                &pen.paint(),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Hand the current picture to `sink`
    pub fn export(&self, sink: &mut dyn ImageSink) -> ToolResult<()> {
        sink.write_image(&self.pixmap)
    }
}

/// Destination for rendered pictures
pub trait ImageSink {
    fn write_image(&mut self, image: &Pixmap) -> ToolResult<()>;
}

/// Keeps every written picture in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    images: Vec<Pixmap>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[Pixmap] {
        &self.images
    }

    pub fn into_images(self) -> Vec<Pixmap> {
        self.images
    }
}

impl ImageSink for MemorySink {
    fn write_image(&mut self, image: &Pixmap) -> ToolResult<()> {
        tracing::debug!("Captured {}x{} image", image.width(), image.height());
        self.images.push(image.clone());
        Ok(())
    }
}
