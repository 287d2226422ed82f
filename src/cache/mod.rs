//! Style-keyed tool cache
//!
//! `ToolCache` builds pens, brushes, fonts, string formats and cap geometry on
//! first request and hands out the same `Arc` for every later request with the
//! same key. Styles are keyed by identity, so after a style is edited the
//! editor calls [`ToolCache::notify_style_changed`], which evicts every tool
//! built from that style and from the styles that depend on it.
//!
//! ## Tables
//! | Table | Key |
//! |---|---|
//! | pens | line style + optional start/end cap styles |
//! | solid brushes | color style |
//! | brushes, image attributes | fill style or ad-hoc image |
//! | fonts | character style |
//! | string formats | paragraph style |
//! | cap paths, custom caps | cap style + line style |

mod invalidation;
mod keys;
mod shared;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tiny_skia::{Point, Transform};

use crate::core::errors::{ToolError, ToolResult};
use crate::core::geometry::{rotation, tenths_to_degrees, transform_point, Bounds};
use crate::style::{
    AnyStyle, CapShape, CapStyle, CharacterStyle, ColorStyle, FillMode, FillStyle, ImageHandle,
    ImageLayout, LineStyle, ParagraphStyle, Rgba, StyleSet,
};
use crate::tools::brush::GRADIENT_UNIT_SIZE;
use crate::tools::{
    build_cap_shape, resolve_color, Brush, CustomLineCap, Font, ImageAttributes, LineEnd, Pen,
    ShapePath, StringFormat,
};

use invalidation::InvalidationPlan;
use keys::{BrushKey, ById, CapKey, PenKey};

pub use shared::SharedToolCache;

/// Initial table capacities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolCacheCapacity {
    pub pens: usize,
    pub solid_brushes: usize,
    pub brushes: usize,
    pub image_attributes: usize,
    pub fonts: usize,
    pub string_formats: usize,
    pub cap_paths: usize,
    pub caps: usize,
}

impl Default for ToolCacheCapacity {
    fn default() -> Self {
        Self {
            pens: 50,
            solid_brushes: 50,
            brushes: 20,
            image_attributes: 5,
            fonts: 10,
            string_formats: 5,
            cap_paths: 10,
            caps: 10,
        }
    }
}

/// Table sizes and lifetime counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolCacheStats {
    pub pens: usize,
    pub solid_brushes: usize,
    pub brushes: usize,
    pub image_attributes: usize,
    pub fonts: usize,
    pub string_formats: usize,
    pub cap_paths: usize,
    pub caps: usize,
    /// Tools built since the cache was created
    pub built: u64,
    /// Tools released by eviction, replacement or clear
    pub released: u64,
}

impl ToolCacheStats {
    pub fn total_entries(&self) -> usize {
        self.pens
            + self.solid_brushes
            + self.brushes
            + self.image_attributes
            + self.fonts
            + self.string_formats
            + self.cap_paths
            + self.caps
    }
}

#[derive(Debug, Default)]
struct Counters {
    built: u64,
    released: u64,
}

impl Counters {
    /// Insert a freshly built tool; a replaced entry counts as released
    fn store<K: Eq + Hash, V>(
        &mut self,
        table: &mut HashMap<K, Arc<V>>,
        key: K,
        value: V,
    ) -> Arc<V> {
        let value = Arc::new(value);
        self.built += 1;
        if table.insert(key, Arc::clone(&value)).is_some() {
            self.released += 1;
        }
        value
    }
}

/// Memoizing tool factory
#[derive(Debug)]
pub struct ToolCache {
    pens: HashMap<PenKey, Arc<Pen>>,
    solid_brushes: HashMap<ById<ColorStyle>, Arc<Brush>>,
    brushes: HashMap<BrushKey, Arc<Brush>>,
    image_attributes: HashMap<BrushKey, Arc<ImageAttributes>>,
    fonts: HashMap<ById<CharacterStyle>, Arc<Font>>,
    string_formats: HashMap<ById<ParagraphStyle>, Arc<StringFormat>>,
    cap_paths: HashMap<CapKey, Arc<ShapePath>>,
    caps: HashMap<CapKey, Arc<CustomLineCap>>,
    counters: Counters,
}

impl Default for ToolCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolCache {
    /// Create an empty cache with the default capacities
    pub fn new() -> Self {
        Self::with_capacity(ToolCacheCapacity::default())
    }

    pub fn with_capacity(capacity: ToolCacheCapacity) -> Self {
        Self {
            pens: HashMap::with_capacity(capacity.pens),
            solid_brushes: HashMap::with_capacity(capacity.solid_brushes),
            brushes: HashMap::with_capacity(capacity.brushes),
            image_attributes: HashMap::with_capacity(capacity.image_attributes),
            fonts: HashMap::with_capacity(capacity.fonts),
            string_formats: HashMap::with_capacity(capacity.string_formats),
            cap_paths: HashMap::with_capacity(capacity.cap_paths),
            caps: HashMap::with_capacity(capacity.caps),
            counters: Counters::default(),
        }
    }

    /// Pen for a line style with optional cap styles at either end
    ///
    /// A missing cap gives a flat end, a cap style of shape `None` a round end.
    pub fn get_pen(
        &mut self,
        line: &Arc<LineStyle>,
        start_cap: Option<&Arc<CapStyle>>,
        end_cap: Option<&Arc<CapStyle>>,
    ) -> ToolResult<Arc<Pen>> {
        let key = PenKey::new(line, start_cap, end_cap);
        if let Some(pen) = self.pens.get(&key) {
            return Ok(Arc::clone(pen));
        }

        let props = line.props();
        let stroke = Pen::stroke_for(&props)?;
        // Both ends are checked before either caches its cap
        for cap in [start_cap, end_cap].into_iter().flatten() {
            let shape = cap.read().cap_shape;
            if shape == CapShape::Unknown {
                return Err(ToolError::unsupported("cap shape", shape));
            }
        }
        let gray = props.color_style.read().convert_to_gray;
        let color = resolve_color(&props.color_style, gray);
        let start = self.line_end(start_cap, line)?;
        let end = self.line_end(end_cap, line)?;

        tracing::trace!(
            "Building pen for line style '{}' ({}px)",
            line.name(),
            props.line_width
        );
        let pen = Pen::new(color, stroke, start, end);
        Ok(self.counters.store(&mut self.pens, key, pen))
    }

    fn line_end(
        &mut self,
        cap: Option<&Arc<CapStyle>>,
        line: &Arc<LineStyle>,
    ) -> ToolResult<LineEnd> {
        let Some(cap) = cap else {
            return Ok(LineEnd::Flat);
        };
        let shape = cap.read().cap_shape;
        if shape == CapShape::None {
            Ok(LineEnd::Round)
        } else {
            Ok(LineEnd::Custom(self.get_custom_line_cap(cap, line)?))
        }
    }

    /// Solid brush in a color style's color
    pub fn get_solid_brush(&mut self, color: &Arc<ColorStyle>) -> Arc<Brush> {
        let key = ById::new(color);
        if let Some(brush) = self.solid_brushes.get(&key) {
            return Arc::clone(brush);
        }

        let gray = color.read().convert_to_gray;
        tracing::trace!("Building solid brush for color style '{}'", color.name());
        let brush = Brush::solid(resolve_color(color, gray));
        self.counters.store(&mut self.solid_brushes, key, brush)
    }

    /// Brush for a fill style
    ///
    /// Gradient brushes are built for a 100x100 rectangle; use
    /// [`ToolCache::get_transformed_brush`] to place them on a shape.
    pub fn get_brush(&mut self, fill: &Arc<FillStyle>) -> ToolResult<Arc<Brush>> {
        let key = BrushKey::Fill(ById::new(fill));
        if let Some(brush) = self.brushes.get(&key) {
            return Ok(Arc::clone(brush));
        }

        let props = fill.props();
        let gray = props.convert_to_grayscale;
        let brush = match props.fill_mode {
            FillMode::Solid => Brush::solid(resolve_color(&props.base_color_style, gray)),
            FillMode::Pattern => Brush::hatch(
                props.fill_pattern,
                resolve_color(&props.base_color_style, gray),
                resolve_color(&props.additional_color_style, gray),
            )?,
            FillMode::Gradient => Brush::linear_gradient(
                Bounds::new(0.0, 0.0, GRADIENT_UNIT_SIZE, GRADIENT_UNIT_SIZE),
                resolve_color(&props.additional_color_style, gray),
                resolve_color(&props.base_color_style, gray),
                props.gradient_angle as f32,
            ),
            FillMode::Image => match &props.image {
                None => Brush::solid(Rgba::TRANSPARENT),
                Some(image) => {
                    let attributes = self.image_attributes_for(
                        &key,
                        props.image_layout,
                        props.image_gamma_correction,
                        props.image_transparency,
                        gray,
                    );
                    Brush::texture(image, attributes)
                }
            },
            FillMode::Unknown => return Err(ToolError::unsupported("fill mode", props.fill_mode)),
        };

        tracing::trace!(
            "Building {:?} brush for fill style '{}'",
            props.fill_mode,
            fill.name()
        );
        Ok(self.counters.store(&mut self.brushes, key, brush))
    }

    /// Texture brush for an image that no fill style owns
    ///
    /// A cached entry that is not a texture brush is rebuilt.
    pub fn get_image_brush(
        &mut self,
        image: &ImageHandle,
        layout: ImageLayout,
        gamma: f32,
        transparency: u8,
        grayscale: bool,
    ) -> Arc<Brush> {
        let key = BrushKey::Image(ById::new(image));
        if let Some(brush) = self.brushes.get(&key) {
            if brush.is_texture() {
                return Arc::clone(brush);
            }
        }

        let attributes = self.image_attributes_for(&key, layout, gamma, transparency, grayscale);
        tracing::trace!(
            "Building texture brush for {}x{} image",
            image.width(),
            image.height()
        );
        let brush = Brush::texture(image, attributes);
        self.counters.store(&mut self.brushes, key, brush)
    }

    fn image_attributes_for(
        &mut self,
        key: &BrushKey,
        layout: ImageLayout,
        gamma: f32,
        transparency: u8,
        grayscale: bool,
    ) -> Arc<ImageAttributes> {
        if let Some(attributes) = self.image_attributes.get(key) {
            return Arc::clone(attributes);
        }
        let attributes = ImageAttributes::new(layout, gamma, transparency, grayscale);
        self.counters
            .store(&mut self.image_attributes, key.clone(), attributes)
    }

    /// Fill-style brush placed on a shape
    ///
    /// `unrotated_bounds` is the shape's bounding box before rotation and
    /// `angle` its rotation about `center` in tenths of a degree. The cached
    /// brush is repositioned in place, so the returned brush is only valid for
    /// this shape until the next call.
    pub fn get_transformed_brush(
        &mut self,
        fill: &Arc<FillStyle>,
        unrotated_bounds: Bounds,
        center: Point,
        angle: i32,
    ) -> ToolResult<Arc<Brush>> {
        let brush = self.get_brush(fill)?;
        brush.fit_to_shape(unrotated_bounds, center, tenths_to_degrees(angle));
        Ok(brush)
    }

    /// Font for a character style
    pub fn get_font(&mut self, character: &Arc<CharacterStyle>) -> Arc<Font> {
        let key = ById::new(character);
        if let Some(font) = self.fonts.get(&key) {
            return Arc::clone(font);
        }

        let font = Font::from_character(&character.read());
        tracing::trace!(
            "Building font {} {}px {:?} for character style '{}'",
            font.family().name(),
            font.size(),
            font.style(),
            character.name()
        );
        self.counters.store(&mut self.fonts, key, font)
    }

    /// String format for a paragraph style
    pub fn get_string_format(
        &mut self,
        paragraph: &Arc<ParagraphStyle>,
    ) -> ToolResult<Arc<StringFormat>> {
        let key = ById::new(paragraph);
        if let Some(format) = self.string_formats.get(&key) {
            return Ok(Arc::clone(format));
        }

        let format = StringFormat::from_paragraph(&paragraph.read())?;
        tracing::trace!(
            "Building string format for paragraph style '{}'",
            paragraph.name()
        );
        Ok(self.counters.store(&mut self.string_formats, key, format))
    }

    /// Custom cap for a cap style at the end of a line style
    pub fn get_custom_line_cap(
        &mut self,
        cap: &Arc<CapStyle>,
        line: &Arc<LineStyle>,
    ) -> ToolResult<Arc<CustomLineCap>> {
        let key = CapKey::new(cap, line);
        if let Some(custom) = self.caps.get(&key) {
            return Ok(Arc::clone(custom));
        }

        let path = self.get_cap_path(cap, line)?;
        let shape = cap.read().cap_shape;
        let base_inset = if shape == CapShape::ArrowOpen {
            0.0
        } else {
            // Distance from the cap's far edge to the line end
            -path.bounds().y
        };

        tracing::trace!(
            "Building {:?} cap for cap style '{}' on line style '{}'",
            shape,
            cap.name(),
            line.name()
        );
        let custom = CustomLineCap::new(path, base_inset);
        Ok(self.counters.store(&mut self.caps, key, custom))
    }

    /// Cap outline in line-width units
    ///
    /// Renderers scale caps by the pen width, so the outline is stored divided
    /// by the line width to keep the cap at its nominal pixel size.
    pub fn get_cap_path(
        &mut self,
        cap: &Arc<CapStyle>,
        line: &Arc<LineStyle>,
    ) -> ToolResult<Arc<ShapePath>> {
        let key = CapKey::new(cap, line);
        if let Some(path) = self.cap_paths.get(&key) {
            return Ok(Arc::clone(path));
        }

        let line_width = line.read().line_width;
        if line_width == 0 {
            return Err(ToolError::InvalidArgument(format!(
                "line style '{}' has zero width",
                line.name()
            )));
        }
        let (shape, size) = {
            let props = cap.read();
            (props.cap_shape, props.cap_size)
        };

        let mut path = build_cap_shape(shape, size)?;
        let scale = 1.0 / line_width as f32;
        path.transform(Transform::from_scale(scale, scale));

        tracing::trace!(
            "Building {:?} cap path (size {}, width {})",
            shape,
            size,
            line_width
        );
        Ok(self.counters.store(&mut self.cap_paths, key, path))
    }

    /// Points of the cached cap outline
    pub fn get_cap_points(
        &mut self,
        cap: &Arc<CapStyle>,
        line: &Arc<LineStyle>,
    ) -> ToolResult<Vec<Point>> {
        Ok(self.get_cap_path(cap, line)?.points())
    }

    /// Bounds of a cap drawn at the end of a line pointing at `angle` degrees
    ///
    /// Not cached; computed from the cached outline scaled back to pixels.
    pub fn get_cap_bounds(
        &mut self,
        cap: &Arc<CapStyle>,
        line: &Arc<LineStyle>,
        angle: f32,
    ) -> ToolResult<Bounds> {
        let mut points = self.get_cap_points(cap, line)?;
        let width = line.read().line_width as f32;
        let ts = Transform::from_scale(width, width).post_concat(rotation(angle + 90.0));
        for p in &mut points {
            *p = transform_point(&ts, *p);
        }
        Ok(Bounds::from_points(&points))
    }

    /// Release every cached tool
    pub fn clear(&mut self) {
        let stats = self.stats();
        let total = stats.total_entries();
        tracing::debug!(
            "Clearing {} cached tools ({} pens, {} brushes, {} fonts, {} caps)",
            total,
            stats.pens,
            stats.solid_brushes + stats.brushes,
            stats.fonts,
            stats.caps
        );

        self.pens.clear();
        self.solid_brushes.clear();
        self.brushes.clear();
        self.image_attributes.clear();
        self.fonts.clear();
        self.string_formats.clear();
        self.cap_paths.clear();
        self.caps.clear();
        self.counters.released += total as u64;
    }

    /// Evict every tool built from `style` or from a style that depends on it
    ///
    /// Returns the number of released tools. Notifying an unchanged or
    /// unused style is harmless.
    pub fn notify_style_changed(&mut self, style: impl Into<AnyStyle>) -> usize {
        let style = style.into();
        let mut plan = InvalidationPlan::default();
        plan.seed(&style);
        let released = self.invalidate(plan);
        if released > 0 {
            tracing::debug!(
                "{} style '{}' changed, released {} tools",
                style.category(),
                style.name(),
                released
            );
        }
        released
    }

    /// Evict every tool built from any style of `set`
    ///
    /// Shape styles are skipped; no tool depends on them.
    pub fn remove_style_set_tools(&mut self, set: &StyleSet) -> usize {
        let mut plan = InvalidationPlan::default();
        for style in set.iter() {
            plan.seed(&style);
        }
        let released = self.invalidate(plan);
        tracing::debug!(
            "Removed tools of style set with {} styles, released {} tools",
            set.len(),
            released
        );
        released
    }

    pub fn stats(&self) -> ToolCacheStats {
        ToolCacheStats {
            pens: self.pens.len(),
            solid_brushes: self.solid_brushes.len(),
            brushes: self.brushes.len(),
            image_attributes: self.image_attributes.len(),
            fonts: self.fonts.len(),
            string_formats: self.string_formats.len(),
            cap_paths: self.cap_paths.len(),
            caps: self.caps.len(),
            built: self.counters.built,
            released: self.counters.released,
        }
    }

    pub fn len(&self) -> usize {
        self.stats().total_entries()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
