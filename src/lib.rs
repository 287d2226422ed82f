//! styletools - style-keyed drawing tool cache
//!
//! Renderers ask a [`ToolCache`] for pens, brushes, fonts, string formats and
//! line caps built from shared style descriptors. Built tools are reused until
//! the editing side reports a style change, which evicts every tool that
//! depends on the changed style.

pub mod cache;
pub mod core;
pub mod style;
pub mod surface;
pub mod tools;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::cache::{SharedToolCache, ToolCache, ToolCacheCapacity, ToolCacheStats};
pub use crate::core::{Bounds, ToolError, ToolResult};
pub use crate::style::{AnyStyle, StyleSet};

/// Install the global tracing subscriber
///
/// Verbosity comes from `RUST_LOG`. Calling this more than once, or after
/// another subscriber was installed, leaves the existing one in place.
pub fn init_logging() {
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "styletools=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("styletools logging initialized");
    }
}
