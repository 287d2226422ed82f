use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ColorStyle, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Bevel,
    Round,
}

impl LineJoin {
    pub fn to_skia(self) -> tiny_skia::LineJoin {
        match self {
            Self::Miter => tiny_skia::LineJoin::Miter,
            Self::Bevel => tiny_skia::LineJoin::Bevel,
            Self::Round => tiny_skia::LineJoin::Round,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DashType {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl DashType {
    /// Dash and gap lengths in line-width units; empty for solid lines
    pub fn default_pattern(self) -> Vec<f32> {
        match self {
            Self::Solid => Vec::new(),
            Self::Dash => vec![3.0, 1.0],
            Self::Dot => vec![1.0, 1.0],
            Self::DashDot => vec![3.0, 1.0, 1.0, 1.0],
            Self::DashDotDot => vec![3.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineProps {
    pub color_style: Arc<ColorStyle>,
    /// Stroke width in pixels, must be positive
    pub line_width: u32,
    pub line_join: LineJoin,
    pub dash_type: DashType,
    /// Dash and gap lengths in line-width units, used when `dash_type` is not solid
    pub dash_pattern: Vec<f32>,
}

impl LineProps {
    /// Solid mitered line
    pub fn new(color_style: Arc<ColorStyle>, line_width: u32) -> Self {
        Self {
            color_style,
            line_width,
            line_join: LineJoin::default(),
            dash_type: DashType::Solid,
            dash_pattern: Vec::new(),
        }
    }

    /// Switch to a dashed line using the dash type's standard pattern
    pub fn with_dash(mut self, dash_type: DashType) -> Self {
        self.dash_pattern = dash_type.default_pattern();
        self.dash_type = dash_type;
        self
    }
}

pub type LineStyle = Style<LineProps>;
