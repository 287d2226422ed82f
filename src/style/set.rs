//! Named style collections
//!
//! A `StyleSet` is what a document or template carries: every style it owns,
//! grouped by category and kept in insertion order. Sets can be built in code
//! or parsed from a JSON definition in which styles refer to each other by
//! name.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use super::{
    load_image, AnyStyle, CapProps, CapShape, CapStyle, CharacterProps, CharacterStyle,
    ColorProps, ColorStyle, ContentAlignment, DashType, FillMode, FillProps, FillStyle,
    FontFamily, FontStyle, HatchStyle, ImageLayout, LineJoin, LineProps, LineStyle,
    ParagraphProps, ParagraphStyle, Rgba, ShapeProps, ShapeStyle, Trimming,
};
use crate::core::errors::{ToolError, ToolResult};

/// Styles grouped by category, keyed by style name
#[derive(Debug, Default)]
pub struct StyleSet {
    pub cap_styles: IndexMap<String, Arc<CapStyle>>,
    pub character_styles: IndexMap<String, Arc<CharacterStyle>>,
    pub color_styles: IndexMap<String, Arc<ColorStyle>>,
    pub fill_styles: IndexMap<String, Arc<FillStyle>>,
    pub line_styles: IndexMap<String, Arc<LineStyle>>,
    pub paragraph_styles: IndexMap<String, Arc<ParagraphStyle>>,
    pub shape_styles: IndexMap<String, Arc<ShapeStyle>>,
}

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a style under its own name, returning the style it replaced
    pub fn add(&mut self, style: impl Into<AnyStyle>) -> Option<AnyStyle> {
        match style.into() {
            AnyStyle::Cap(s) => self
                .cap_styles
                .insert(s.name().to_string(), s)
                .map(AnyStyle::Cap),
            AnyStyle::Character(s) => self
                .character_styles
                .insert(s.name().to_string(), s)
                .map(AnyStyle::Character),
            AnyStyle::Color(s) => self
                .color_styles
                .insert(s.name().to_string(), s)
                .map(AnyStyle::Color),
            AnyStyle::Fill(s) => self
                .fill_styles
                .insert(s.name().to_string(), s)
                .map(AnyStyle::Fill),
            AnyStyle::Line(s) => self
                .line_styles
                .insert(s.name().to_string(), s)
                .map(AnyStyle::Line),
            AnyStyle::Paragraph(s) => self
                .paragraph_styles
                .insert(s.name().to_string(), s)
                .map(AnyStyle::Paragraph),
            AnyStyle::Shape(s) => self
                .shape_styles
                .insert(s.name().to_string(), s)
                .map(AnyStyle::Shape),
        }
    }

    /// Every style in the set, category by category
    pub fn iter(&self) -> impl Iterator<Item = AnyStyle> + '_ {
        let caps = self.cap_styles.values().cloned().map(AnyStyle::Cap);
        let chars = self
            .character_styles
            .values()
            .cloned()
            .map(AnyStyle::Character);
        let colors = self.color_styles.values().cloned().map(AnyStyle::Color);
        let fills = self.fill_styles.values().cloned().map(AnyStyle::Fill);
        let lines = self.line_styles.values().cloned().map(AnyStyle::Line);
        let paragraphs = self
            .paragraph_styles
            .values()
            .cloned()
            .map(AnyStyle::Paragraph);
        let shapes = self.shape_styles.values().cloned().map(AnyStyle::Shape);

        caps.chain(chars)
            .chain(colors)
            .chain(fills)
            .chain(lines)
            .chain(paragraphs)
            .chain(shapes)
    }

    pub fn len(&self) -> usize {
        self.cap_styles.len()
            + self.character_styles.len()
            + self.color_styles.len()
            + self.fill_styles.len()
            + self.line_styles.len()
            + self.paragraph_styles.len()
            + self.shape_styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a JSON style-set definition
    pub fn from_json(json: &str) -> ToolResult<Self> {
        let def: StyleSetDef = serde_json::from_str(json)?;
        Self::from_def(def)
    }

    /// Build a set from a definition
    ///
    /// Categories are resolved in dependency order (colors and font families
    /// first), so a style may only refer to styles of the categories it uses.
    pub fn from_def(def: StyleSetDef) -> ToolResult<Self> {
        let mut set = Self::new();

        for c in def.color_styles {
            set.add(ColorStyle::new(
                c.name,
                ColorProps {
                    color: c.color,
                    convert_to_gray: c.convert_to_gray,
                },
            ));
        }

        let mut families: IndexMap<String, Arc<FontFamily>> = IndexMap::new();
        for f in def.font_families {
            families.insert(f.name.clone(), FontFamily::new(f.name, f.styles));
        }

        for l in def.line_styles {
            let color_style = set.color_ref(&l.name, &l.color_style)?;
            let dash_pattern = l
                .dash_pattern
                .unwrap_or_else(|| l.dash_type.default_pattern());
            set.add(LineStyle::new(
                l.name,
                LineProps {
                    color_style,
                    line_width: l.line_width,
                    line_join: l.line_join,
                    dash_type: l.dash_type,
                    dash_pattern,
                },
            ));
        }

        for c in def.cap_styles {
            let color_style = set.color_ref(&c.name, &c.color_style)?;
            set.add(CapStyle::new(
                c.name,
                CapProps::new(c.cap_shape, c.cap_size, color_style),
            ));
        }

        for f in def.fill_styles {
            let base_color_style = set.color_ref(&f.name, &f.base_color_style)?;
            let additional_color_style = match &f.additional_color_style {
                Some(name) => set.color_ref(&f.name, name)?,
                None => Arc::clone(&base_color_style),
            };
            let image = f.image.as_ref().map(load_image).transpose()?;
            set.add(FillStyle::new(
                f.name,
                FillProps {
                    base_color_style,
                    additional_color_style,
                    fill_mode: f.fill_mode,
                    fill_pattern: f.fill_pattern,
                    gradient_angle: f.gradient_angle,
                    convert_to_grayscale: f.convert_to_grayscale,
                    image,
                    image_layout: f.image_layout,
                    image_gamma_correction: f.image_gamma_correction,
                    image_transparency: f.image_transparency,
                },
            ));
        }

        for c in def.character_styles {
            let font_family = families.get(&c.font_family).cloned().ok_or_else(|| {
                ToolError::InvalidArgument(format!(
                    "character style '{}' refers to unknown font family '{}'",
                    c.name, c.font_family
                ))
            })?;
            set.add(CharacterStyle::new(
                c.name,
                CharacterProps::new(font_family, c.size, c.style),
            ));
        }

        for p in def.paragraph_styles {
            set.add(ParagraphStyle::new(
                p.name,
                ParagraphProps {
                    alignment: p.alignment,
                    word_wrap: p.word_wrap,
                    trimming: p.trimming,
                },
            ));
        }

        for s in def.shape_styles {
            set.add(ShapeStyle::new(
                s.name,
                ShapeProps {
                    rounded_corners: s.rounded_corners,
                    show_gradients: s.show_gradients,
                    show_shadow: s.show_shadow,
                },
            ));
        }

        tracing::debug!("Built style set with {} styles", set.len());
        Ok(set)
    }

    fn color_ref(&self, owner: &str, name: &str) -> ToolResult<Arc<ColorStyle>> {
        self.color_styles.get(name).cloned().ok_or_else(|| {
            ToolError::InvalidArgument(format!(
                "style '{}' refers to unknown color style '{}'",
                owner, name
            ))
        })
    }
}

/// JSON form of a style set
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSetDef {
    pub color_styles: Vec<ColorStyleDef>,
    pub font_families: Vec<FontFamilyDef>,
    pub line_styles: Vec<LineStyleDef>,
    pub cap_styles: Vec<CapStyleDef>,
    pub fill_styles: Vec<FillStyleDef>,
    pub character_styles: Vec<CharacterStyleDef>,
    pub paragraph_styles: Vec<ParagraphStyleDef>,
    pub shape_styles: Vec<ShapeStyleDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorStyleDef {
    pub name: String,
    pub color: Rgba,
    #[serde(default)]
    pub convert_to_gray: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontFamilyDef {
    pub name: String,
    pub styles: Vec<FontStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineStyleDef {
    pub name: String,
    pub color_style: String,
    pub line_width: u32,
    #[serde(default)]
    pub line_join: LineJoin,
    #[serde(default)]
    pub dash_type: DashType,
    /// Defaults to the dash type's standard pattern
    #[serde(default)]
    pub dash_pattern: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapStyleDef {
    pub name: String,
    pub cap_shape: CapShape,
    pub cap_size: u32,
    pub color_style: String,
}

fn default_gamma() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillStyleDef {
    pub name: String,
    pub base_color_style: String,
    /// Defaults to the base color
    #[serde(default)]
    pub additional_color_style: Option<String>,
    #[serde(default)]
    pub fill_mode: FillMode,
    #[serde(default)]
    pub fill_pattern: HatchStyle,
    #[serde(default)]
    pub gradient_angle: i32,
    #[serde(default)]
    pub convert_to_grayscale: bool,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub image_layout: ImageLayout,
    #[serde(default = "default_gamma")]
    pub image_gamma_correction: f32,
    #[serde(default)]
    pub image_transparency: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterStyleDef {
    pub name: String,
    pub font_family: String,
    pub size: f32,
    #[serde(default)]
    pub style: FontStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphStyleDef {
    pub name: String,
    #[serde(default)]
    pub alignment: ContentAlignment,
    #[serde(default = "default_word_wrap")]
    pub word_wrap: bool,
    #[serde(default)]
    pub trimming: Trimming,
}

fn default_word_wrap() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeStyleDef {
    pub name: String,
    #[serde(default)]
    pub rounded_corners: u8,
    #[serde(default)]
    pub show_gradients: bool,
    #[serde(default)]
    pub show_shadow: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "color_styles": [
            { "name": "Black", "color": { "r": 0, "g": 0, "b": 0, "a": 255 } },
            { "name": "Sky", "color": { "r": 100, "g": 150, "b": 200, "a": 255 }, "convert_to_gray": true }
        ],
        "font_families": [
            { "name": "Sans", "styles": ["", "BOLD"] }
        ],
        "line_styles": [
            { "name": "Thin", "color_style": "Black", "line_width": 1 },
            { "name": "Dashed", "color_style": "Sky", "line_width": 2, "dash_type": "Dash" }
        ],
        "cap_styles": [
            { "name": "Arrow", "cap_shape": "ArrowClosed", "cap_size": 10, "color_style": "Black" }
        ],
        "fill_styles": [
            { "name": "Sky", "base_color_style": "Sky", "additional_color_style": "Black", "fill_mode": "Gradient", "gradient_angle": 45 }
        ],
        "character_styles": [
            { "name": "Body", "font_family": "Sans", "size": 12.0, "style": "BOLD" }
        ],
        "paragraph_styles": [
            { "name": "Label", "alignment": "TopLeft", "word_wrap": false }
        ],
        "shape_styles": [
            { "name": "Plain" }
        ]
    }"#;

    #[test]
    fn test_from_json_resolves_references() {
        let set = StyleSet::from_json(DOC).unwrap();
        assert_eq!(set.len(), 9);

        let dashed = set.line_styles.get("Dashed").unwrap().props();
        assert!(Arc::ptr_eq(
            &dashed.color_style,
            set.color_styles.get("Sky").unwrap()
        ));
        assert_eq!(dashed.dash_pattern, vec![3.0, 1.0]);

        let fill = set.fill_styles.get("Sky").unwrap().props();
        assert_eq!(fill.fill_mode, FillMode::Gradient);
        assert_eq!(fill.image_gamma_correction, 1.0);
        assert!(Arc::ptr_eq(
            &fill.additional_color_style,
            set.color_styles.get("Black").unwrap()
        ));

        let body = set.character_styles.get("Body").unwrap().props();
        assert_eq!(body.style, FontStyle::BOLD);
        assert!(body.font_family.is_style_available(FontStyle::REGULAR));

        let label = set.paragraph_styles.get("Label").unwrap().props();
        assert!(!label.word_wrap);
    }

    #[test]
    fn test_unknown_color_reference_fails() {
        let doc = r#"{
            "line_styles": [ { "name": "Thin", "color_style": "Missing", "line_width": 1 } ]
        }"#;
        let err = StyleSet::from_json(doc).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
    }

    #[test]
    fn test_iter_is_category_ordered() {
        let set = StyleSet::from_json(DOC).unwrap();
        let categories: Vec<_> = set.iter().map(|s| s.category()).collect();
        assert_eq!(
            categories,
            vec![
                "cap",
                "character",
                "color",
                "color",
                "fill",
                "line",
                "line",
                "paragraph",
                "shape"
            ]
        );
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut set = StyleSet::new();
        let first = ColorStyle::new("Red", ColorProps::new(Rgba::opaque(255, 0, 0)));
        let second = ColorStyle::new("Red", ColorProps::new(Rgba::opaque(200, 0, 0)));

        assert!(set.add(first.clone()).is_none());
        match set.add(second) {
            Some(AnyStyle::Color(old)) => assert!(Arc::ptr_eq(&old, &first)),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(set.len(), 1);
    }
}
