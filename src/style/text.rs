use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Style;

bitflags! {
    /// Font face variations; the empty set is the regular face
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FontStyle: u8 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKEOUT = 1 << 3;
    }
}

impl FontStyle {
    pub const REGULAR: Self = Self::empty();
}

/// An installed font family and the face styles it provides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    name: String,
    styles: Vec<FontStyle>,
}

impl FontFamily {
    pub fn new(name: impl Into<String>, styles: impl IntoIterator<Item = FontStyle>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            styles: styles.into_iter().collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn styles(&self) -> &[FontStyle] {
        &self.styles
    }

    pub fn is_style_available(&self, style: FontStyle) -> bool {
        self.styles.contains(&style)
    }
}

#[derive(Debug, Clone)]
pub struct CharacterProps {
    pub font_family: Arc<FontFamily>,
    /// Em size in pixels
    pub size: f32,
    pub style: FontStyle,
}

impl CharacterProps {
    pub fn new(font_family: Arc<FontFamily>, size: f32, style: FontStyle) -> Self {
        Self {
            font_family,
            size,
            style,
        }
    }
}

pub type CharacterStyle = Style<CharacterProps>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentAlignment {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    #[default]
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Alignment written by a newer producer
    #[serde(other)]
    Unknown,
}

/// What to do with text that overflows its layout box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Trimming {
    None,
    #[default]
    Character,
    Word,
    EllipsisCharacter,
    EllipsisWord,
    EllipsisPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphProps {
    pub alignment: ContentAlignment,
    pub word_wrap: bool,
    pub trimming: Trimming,
}

impl Default for ParagraphProps {
    fn default() -> Self {
        Self {
            alignment: ContentAlignment::default(),
            word_wrap: true,
            trimming: Trimming::default(),
        }
    }
}

pub type ParagraphStyle = Style<ParagraphProps>;
