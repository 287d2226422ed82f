use parking_lot::Mutex;
use std::sync::Arc;

use super::{ToolCache, ToolCacheStats};
use crate::style::AnyStyle;

/// A `ToolCache` shared between threads behind one lock
///
/// Each call holds the lock for a single cache operation, so a renderer on one
/// thread and a style editor on another never see a half-swept table.
#[derive(Debug, Clone, Default)]
pub struct SharedToolCache {
    inner: Arc<Mutex<ToolCache>>,
}

impl SharedToolCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cache(cache: ToolCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Run `f` with exclusive access to the cache
    pub fn with<R>(&self, f: impl FnOnce(&mut ToolCache) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }

    pub fn notify_style_changed(&self, style: impl Into<AnyStyle>) -> usize {
        self.with(|cache| cache.notify_style_changed(style))
    }

    pub fn clear(&self) {
        self.with(ToolCache::clear)
    }

    pub fn stats(&self) -> ToolCacheStats {
        self.inner.lock().stats()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::style::{ColorProps, ColorStyle, Rgba};
    use std::thread;

    #[test]
    fn test_shared_across_threads() {
        let shared = SharedToolCache::new();
        let red = ColorStyle::new("Red", ColorProps::new(Rgba::opaque(255, 0, 0)));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                let red = Arc::clone(&red);
                thread::spawn(move || shared.with(|cache| cache.get_solid_brush(&red)))
            })
            .collect();
        let brushes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(brushes.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(shared.stats().solid_brushes, 1);

        assert_eq!(shared.notify_style_changed(red), 1);
        assert_eq!(shared.stats().solid_brushes, 0);
        shared.clear();
        assert!(shared.with(|cache| cache.is_empty()));
    }
}
