//! Cache keys
//!
//! Styles are keyed by identity, never by value: editing a style in place
//! keeps its key, which is why the cache must be notified.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tiny_skia::Pixmap;

use crate::style::{CapStyle, FillStyle, LineStyle};

/// `Arc` compared and hashed by pointer
pub(crate) struct ById<T>(pub(crate) Arc<T>);

impl<T> ById<T> {
    pub(crate) fn new(value: &Arc<T>) -> Self {
        Self(Arc::clone(value))
    }

    pub(crate) fn is(&self, other: &Arc<T>) -> bool {
        Arc::ptr_eq(&self.0, other)
    }
}

impl<T> Clone for ById<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for ById<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for ById<T> {}

impl<T> Hash for ById<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl<T> fmt::Debug for ById<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ById({:p})", Arc::as_ptr(&self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PenKey {
    pub(crate) line: ById<LineStyle>,
    pub(crate) start_cap: Option<ById<CapStyle>>,
    pub(crate) end_cap: Option<ById<CapStyle>>,
}

impl PenKey {
    pub(crate) fn new(
        line: &Arc<LineStyle>,
        start_cap: Option<&Arc<CapStyle>>,
        end_cap: Option<&Arc<CapStyle>>,
    ) -> Self {
        Self {
            line: ById::new(line),
            start_cap: start_cap.map(ById::new),
            end_cap: end_cap.map(ById::new),
        }
    }

    /// Cap styles of both ends
    pub(crate) fn caps(&self) -> impl Iterator<Item = &ById<CapStyle>> {
        self.start_cap.iter().chain(self.end_cap.iter())
    }
}

/// Cap geometry depends on the cap and on the width of the line it ends
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CapKey {
    pub(crate) cap: ById<CapStyle>,
    pub(crate) line: ById<LineStyle>,
}

impl CapKey {
    pub(crate) fn new(cap: &Arc<CapStyle>, line: &Arc<LineStyle>) -> Self {
        Self {
            cap: ById::new(cap),
            line: ById::new(line),
        }
    }
}

/// Brushes come either from a fill style or from an ad-hoc image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum BrushKey {
    Fill(ById<FillStyle>),
    Image(ById<Pixmap>),
}
