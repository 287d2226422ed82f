use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ColorStyle, Style};

/// Line-end decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CapShape {
    /// Plain round line end, no custom geometry
    #[default]
    None,
    ArrowClosed,
    /// Arrow drawn as two strokes with a one unit notch at the tip
    ArrowOpen,
    Triangle,
    Circle,
    Square,
    Diamond,
    CenteredCircle,
    CenteredHalfCircle,
    /// Shape written by a newer producer
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone)]
pub struct CapProps {
    pub cap_shape: CapShape,
    /// Cap extent in pixels
    pub cap_size: u32,
    pub color_style: Arc<ColorStyle>,
}

impl CapProps {
    pub fn new(cap_shape: CapShape, cap_size: u32, color_style: Arc<ColorStyle>) -> Self {
        Self {
            cap_shape,
            cap_size,
            color_style,
        }
    }
}

pub type CapStyle = Style<CapProps>;
