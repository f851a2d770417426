//! Handler trait for record rendering chains

use super::error::Result;
use super::level::Level;
use super::record::Record;
use super::value::Attr;
use std::sync::Arc;

/// A destination-facing record processor.
///
/// `with_attrs` and `with_group` return new, independent handler values;
/// handlers sharing a lineage never observe each other's additions. Every
/// handler exposes `flush` directly, a no-op where the variant has nothing
/// to flush, so callers never probe for the capability at runtime.
pub trait Handler: Send + Sync {
    fn enabled(&self, level: Level) -> bool;

    fn handle(&self, record: &Record) -> Result<()>;

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    fn with_group(&self, name: &str) -> Arc<dyn Handler>;

    fn flush(&self) -> Result<()>;
}

/// Options shared by every renderer.
#[derive(Debug, Clone, Default)]
pub struct HandlerOptions {
    /// Render `"source": "file:line"` for records that carry a callsite.
    pub add_source: bool,
    /// Minimum enabled level; `None` means `Info`.
    pub level: Option<Level>,
}

impl HandlerOptions {
    pub fn min_level(&self) -> Level {
        self.level.unwrap_or_default()
    }
}
