//! Primary structured logging API

use super::handler::Handler;
use super::level::Level;
use super::record::{Record, Source};
use super::value::Attr;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// A cheap-to-clone handle over a handler chain.
///
/// Clones share the chain; `with_attrs`/`with_group` derive new independent
/// lineages. Log calls never fail the caller: render and write errors are
/// swallowed here.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>, attrs: Vec<Attr>) {
        if !self.handler.enabled(level) {
            return;
        }
        let caller = Location::caller();
        let mut record = Record::new(level, message);
        record.source = Some(Source::new(caller.file(), caller.line()));
        record.add_attrs(attrs);
        self.log_record(&record);
    }

    /// Hand a fully built record to the handler chain. Used by the adapter
    /// bridges, which stamp their own source and timestamp.
    pub fn log_record(&self, record: &Record) {
        if !self.handler.enabled(record.level) {
            return;
        }
        let _ = self.handler.handle(record);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(Level::Debug, message, attrs);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(Level::Info, message, attrs);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(Level::Warn, message, attrs);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>, attrs: Vec<Attr>) {
        self.log(Level::Error, message, attrs);
    }

    #[must_use]
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Logger {
        Logger {
            handler: self.handler.with_attrs(attrs),
        }
    }

    #[must_use]
    pub fn with_group(&self, name: &str) -> Logger {
        Logger {
            handler: self.handler.with_group(name),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
