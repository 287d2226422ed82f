use std::sync::Arc;
use tiny_skia::{LineCap, Paint, Stroke, StrokeDash};

use super::path::ShapePath;
use crate::core::errors::{ToolError, ToolResult};
use crate::style::{DashType, LineJoin, LineProps, Rgba};

/// How one end of a stroked line is finished
#[derive(Debug, Clone)]
pub enum LineEnd {
    Flat,
    Round,
    Custom(Arc<CustomLineCap>),
}

impl LineEnd {
    pub fn custom_cap(&self) -> Option<&Arc<CustomLineCap>> {
        match self {
            Self::Custom(cap) => Some(cap),
            _ => None,
        }
    }
}

/// Cap geometry attached to a pen end
///
/// The path is expressed in line-width units; the renderer scales it by the
/// pen width when drawing.
#[derive(Debug)]
pub struct CustomLineCap {
    path: Arc<ShapePath>,
    stroke_join: LineJoin,
    width_scale: f32,
    base_inset: f32,
}

impl CustomLineCap {
    pub fn new(path: Arc<ShapePath>, base_inset: f32) -> Self {
        Self {
            path,
            stroke_join: LineJoin::Round,
            width_scale: 1.0,
            base_inset,
        }
    }

    pub fn path(&self) -> &Arc<ShapePath> {
        &self.path
    }

    pub fn stroke_join(&self) -> LineJoin {
        self.stroke_join
    }

    pub fn width_scale(&self) -> f32 {
        self.width_scale
    }

    /// Distance the line is pulled back from its end so it meets the cap
    pub fn base_inset(&self) -> f32 {
        self.base_inset
    }
}

/// Stroke tool built from a line style and optional cap styles
#[derive(Debug)]
pub struct Pen {
    color: Rgba,
    stroke: Stroke,
    start_cap: LineEnd,
    end_cap: LineEnd,
}

impl Pen {
    /// Stroke settings for a line style; fails for unusable width or dash pattern
    pub fn stroke_for(line: &LineProps) -> ToolResult<Stroke> {
        if line.line_width == 0 {
            return Err(ToolError::InvalidArgument(
                "line width must be greater than zero".into(),
            ));
        }
        let width = line.line_width as f32;

        Ok(Stroke {
            width,
            line_join: line.line_join.to_skia(),
            dash: dash_for(line.dash_type, &line.dash_pattern, width)?,
            ..Stroke::default()
        })
    }

    pub fn new(color: Rgba, mut stroke: Stroke, start_cap: LineEnd, end_cap: LineEnd) -> Self {
        // tiny-skia has a single cap for both ends
        let round = matches!(start_cap, LineEnd::Round) || matches!(end_cap, LineEnd::Round);
        stroke.line_cap = if round {
            LineCap::Round
        } else {
            LineCap::Butt
        };

        Self {
            color,
            stroke,
            start_cap,
            end_cap,
        }
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.stroke.width
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn start_cap(&self) -> &LineEnd {
        &self.start_cap
    }

    pub fn end_cap(&self) -> &LineEnd {
        &self.end_cap
    }

    pub fn is_dashed(&self) -> bool {
        self.stroke.dash.is_some()
    }

    pub fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(self.color.to_skia());
        paint.anti_alias = true;
        paint
    }
}

/// Dash intervals in pixels; `None` for solid lines
fn dash_for(dash_type: DashType, pattern: &[f32], width: f32) -> ToolResult<Option<StrokeDash>> {
    if dash_type == DashType::Solid {
        return Ok(None);
    }

    let default_pattern;
    let pattern = if pattern.is_empty() {
        default_pattern = dash_type.default_pattern();
        &default_pattern[..]
    } else {
        pattern
    };

    let mut intervals: Vec<f32> = pattern.iter().map(|v| v * width).collect();
    if intervals.len() % 2 == 1 {
        intervals.extend_from_within(..);
    }

    StrokeDash::new(intervals, 0.0)
        .map(Some)
        .ok_or_else(|| ToolError::InvalidArgument(format!("invalid dash pattern {:?}", pattern)))
}
