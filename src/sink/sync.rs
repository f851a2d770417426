//! Flush-once coordination wrapper

use super::Sink;
use crate::core::{Attr, Handler, Level, Record, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Wraps a sink plus an inner handler so the sink's flush runs at most
/// once over the wrapper's lifetime.
///
/// The first `flush` performs the real sink flush and returns its result;
/// every later call, from any thread, returns `Ok(())` without touching
/// the sink again (idempotent-once). Handlers derived through
/// `with_attrs`/`with_group` share the same flush state, so the whole
/// lineage still flushes its sink exactly once.
pub struct SyncHandler {
    sink: Arc<Sink>,
    inner: Arc<dyn Handler>,
    flushed: Arc<Mutex<bool>>,
}

impl SyncHandler {
    pub fn new(sink: Arc<Sink>, inner: Arc<dyn Handler>) -> Self {
        Self {
            sink,
            inner,
            flushed: Arc::new(Mutex::new(false)),
        }
    }

    fn rewrap(&self, inner: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(SyncHandler {
            sink: Arc::clone(&self.sink),
            inner,
            flushed: Arc::clone(&self.flushed),
        })
    }
}

impl Handler for SyncHandler {
    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        self.inner.handle(record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        self.rewrap(self.inner.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        self.rewrap(self.inner.with_group(name))
    }

    fn flush(&self) -> Result<()> {
        let mut flushed = self.flushed.lock();
        if *flushed {
            return Ok(());
        }
        *flushed = true;
        self.sink.flush()
    }
}
