use bitflags::bitflags;
use std::sync::Arc;

use crate::core::errors::{ToolError, ToolResult};
use crate::style::{
    CharacterProps, ContentAlignment, FontFamily, FontStyle, ParagraphProps, Trimming,
};

/// Styles tried, in order, when a family lacks the requested one
const FALLBACK_STYLES: [FontStyle; 4] = [
    FontStyle::REGULAR,
    FontStyle::BOLD,
    FontStyle::ITALIC,
    FontStyle::STRIKEOUT,
];

/// Pixel-sized font
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: Arc<FontFamily>,
    size: f32,
    style: FontStyle,
}

impl Font {
    /// Font for a character style, substituting an available face style
    pub fn from_character(props: &CharacterProps) -> Self {
        Self {
            style: available_style(&props.font_family, props.style),
            family: Arc::clone(&props.font_family),
            size: props.size,
        }
    }

    pub fn family(&self) -> &Arc<FontFamily> {
        &self.family
    }

    /// Em size in pixels
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }
}

/// The requested style if the family has it, otherwise the first fallback
/// face the family has, combined with the request when that also exists
pub fn available_style(family: &FontFamily, requested: FontStyle) -> FontStyle {
    if family.is_style_available(requested) {
        return requested;
    }

    let Some(fallback) = FALLBACK_STYLES
        .into_iter()
        .find(|&style| family.is_style_available(style))
    else {
        return requested;
    };

    let combined = requested | fallback;
    if family.is_style_available(combined) {
        combined
    } else {
        fallback
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringAlignment {
    Near,
    Center,
    Far,
}

bitflags! {
    /// Text layout switches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StringFormatFlags: u32 {
        const FIT_BLACK_BOX = 0x0004;
        const MEASURE_TRAILING_SPACES = 0x0800;
        const NO_WRAP = 0x1000;
    }
}

/// Text layout settings for a paragraph style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFormat {
    /// Horizontal alignment
    pub alignment: StringAlignment,
    /// Vertical alignment
    pub line_alignment: StringAlignment,
    pub flags: StringFormatFlags,
    pub trimming: Trimming,
}

impl StringFormat {
    pub fn from_paragraph(props: &ParagraphProps) -> ToolResult<Self> {
        use StringAlignment::{Center, Far, Near};

        let (alignment, line_alignment) = match props.alignment {
            ContentAlignment::TopLeft => (Near, Near),
            ContentAlignment::TopCenter => (Center, Near),
            ContentAlignment::TopRight => (Far, Near),
            ContentAlignment::MiddleLeft => (Near, Center),
            ContentAlignment::MiddleCenter => (Center, Center),
            ContentAlignment::MiddleRight => (Far, Center),
            ContentAlignment::BottomLeft => (Near, Far),
            ContentAlignment::BottomCenter => (Center, Far),
            ContentAlignment::BottomRight => (Far, Far),
            ContentAlignment::Unknown => {
                return Err(ToolError::unsupported("content alignment", props.alignment))
            }
        };

        let mut flags =
            StringFormatFlags::MEASURE_TRAILING_SPACES | StringFormatFlags::FIT_BLACK_BOX;
        if !props.word_wrap {
            flags |= StringFormatFlags::NO_WRAP;
        }

        Ok(Self {
            alignment,
            line_alignment,
            flags,
            trimming: props.trimming,
        })
    }
}
