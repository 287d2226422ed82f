//! Cascading eviction
//!
//! A notification is turned into an `InvalidationPlan`: the set of changed
//! styles per category. The plan is expanded along the dependencies
//! color -> fill, color -> line, color -> cap and line -> cap, in that order,
//! so every style is visited once and the walk always terminates. Only then
//! are the tables swept.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use super::keys::{BrushKey, ById};
use super::ToolCache;
use crate::style::{
    AnyStyle, CapStyle, CharacterStyle, ColorStyle, FillMode, FillStyle, LineStyle,
    ParagraphStyle,
};

#[derive(Debug, Default)]
pub(crate) struct InvalidationPlan {
    caps: HashSet<ById<CapStyle>>,
    characters: HashSet<ById<CharacterStyle>>,
    colors: HashSet<ById<ColorStyle>>,
    fills: HashSet<ById<FillStyle>>,
    lines: HashSet<ById<LineStyle>>,
    paragraphs: HashSet<ById<ParagraphStyle>>,
}

impl InvalidationPlan {
    pub(crate) fn seed(&mut self, style: &AnyStyle) {
        match style {
            AnyStyle::Cap(s) => {
                self.caps.insert(ById::new(s));
            }
            AnyStyle::Character(s) => {
                self.characters.insert(ById::new(s));
            }
            AnyStyle::Color(s) => {
                self.colors.insert(ById::new(s));
            }
            AnyStyle::Fill(s) => {
                self.fills.insert(ById::new(s));
            }
            AnyStyle::Line(s) => {
                self.lines.insert(ById::new(s));
            }
            AnyStyle::Paragraph(s) => {
                self.paragraphs.insert(ById::new(s));
            }
            AnyStyle::Shape(_) => {}
        }
    }

    fn has_color(&self, color: &Arc<ColorStyle>) -> bool {
        self.colors.contains(&ById::new(color))
    }

    fn is_empty(&self) -> bool {
        self.caps.is_empty()
            && self.characters.is_empty()
            && self.colors.is_empty()
            && self.fills.is_empty()
            && self.lines.is_empty()
            && self.paragraphs.is_empty()
    }
}

/// Remove matching entries, returning how many were released
fn evict<K, V>(table: &mut HashMap<K, Arc<V>>, mut doomed: impl FnMut(&K) -> bool) -> usize
where
    K: Eq + Hash,
{
    let before = table.len();
    table.retain(|key, _| !doomed(key));
    before - table.len()
}

impl ToolCache {
    /// Expand `plan` to every dependent style and evict what it covers
    pub(crate) fn invalidate(&mut self, mut plan: InvalidationPlan) -> usize {
        if plan.is_empty() {
            return 0;
        }
        self.expand(&mut plan);

        let released = evict(&mut self.solid_brushes, |k| plan.colors.contains(k))
            + evict(&mut self.brushes, |k| is_fill_in(k, &plan.fills))
            + evict(&mut self.image_attributes, |k| is_fill_in(k, &plan.fills))
            + evict(&mut self.pens, |k| {
                plan.lines.contains(&k.line) || k.caps().any(|c| plan.caps.contains(c))
            })
            + evict(&mut self.caps, |k| plan.caps.contains(&k.cap))
            + evict(&mut self.cap_paths, |k| plan.caps.contains(&k.cap))
            + evict(&mut self.fonts, |k| plan.characters.contains(k))
            + evict(&mut self.string_formats, |k| plan.paragraphs.contains(k));

        self.counters.released += released as u64;
        tracing::trace!(
            "Invalidated {} colors, {} fills, {} lines, {} caps, {} characters, {} paragraphs",
            plan.colors.len(),
            plan.fills.len(),
            plan.lines.len(),
            plan.caps.len(),
            plan.characters.len(),
            plan.paragraphs.len()
        );
        released
    }

    /// Add the cached styles that depend on already planned ones
    fn expand(&self, plan: &mut InvalidationPlan) {
        if !plan.colors.is_empty() {
            // Image fills never use their colors
            for key in self.brushes.keys() {
                let BrushKey::Fill(fill) = key else { continue };
                let props = fill.0.read();
                if props.fill_mode != FillMode::Image
                    && (plan.has_color(&props.base_color_style)
                        || plan.has_color(&props.additional_color_style))
                {
                    plan.fills.insert(fill.clone());
                }
            }

            for key in self.pens.keys() {
                let line_color = plan.has_color(&key.line.0.read().color_style);
                let cap_color = key
                    .caps()
                    .any(|cap| plan.has_color(&cap.0.read().color_style));
                if line_color || cap_color {
                    plan.lines.insert(key.line.clone());
                }
            }

            for key in self.caps.keys().chain(self.cap_paths.keys()) {
                if plan.has_color(&key.cap.0.read().color_style) {
                    plan.caps.insert(key.cap.clone());
                }
            }
        }

        if !plan.lines.is_empty() {
            for key in self.caps.keys().chain(self.cap_paths.keys()) {
                if plan.lines.contains(&key.line) {
                    plan.caps.insert(key.cap.clone());
                }
            }
        }
    }
}

fn is_fill_in(key: &BrushKey, fills: &HashSet<ById<FillStyle>>) -> bool {
    matches!(key, BrushKey::Fill(fill) if fills.contains(fill))
}
