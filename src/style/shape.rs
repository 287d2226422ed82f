use serde::{Deserialize, Serialize};

use super::Style;

/// Shape decoration switches
///
/// No cached tool depends on a shape style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeProps {
    pub rounded_corners: u8,
    pub show_gradients: bool,
    pub show_shadow: bool,
}

pub type ShapeStyle = Style<ShapeProps>;
