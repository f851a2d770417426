//! Bridge for the `log` crate and its structured key-value records
//!
//! Implements [`log::Log`] over a canonical [`Logger`], translating levels
//! in both directions and the typed `log::kv` values into canonical
//! attributes. Translation never fails: kinds the kv model cannot hand
//! over directly are serialized into an opaque-any value.

use crate::core::{Attr, Level, Logger, Record, Source, Value};

pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.logger.enabled(to_canonical_level(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut collector = KvCollector::default();
        // loss-tolerant by construction; a visit error never fails the call
        let _ = record.key_values().visit(&mut collector);

        let mut canonical = Record::new(
            to_canonical_level(record.level()),
            record.args().to_string(),
        );
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            canonical.source = Some(Source::new(file, line));
        }
        canonical.add_attrs(collector.attrs);

        self.logger.log_record(&canonical);
    }

    fn flush(&self) {
        let _ = self.logger.handler().flush();
    }
}

#[derive(Default)]
struct KvCollector {
    attrs: Vec<Attr>,
}

impl<'kv> log::kv::VisitSource<'kv> for KvCollector {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kv>,
        value: log::kv::Value<'kv>,
    ) -> Result<(), log::kv::Error> {
        self.attrs.push(Attr::new(key.as_str(), to_canonical_value(&value)));
        Ok(())
    }
}

pub fn to_canonical_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

pub fn from_canonical_level(level: Level) -> log::Level {
    match level {
        Level::Error => log::Level::Error,
        Level::Warn => log::Level::Warn,
        Level::Info => log::Level::Info,
        Level::Debug => log::Level::Debug,
    }
}

/// Translate a structured kv value into the canonical model. Primitive
/// kinds stay typed; everything else round-trips through serde into an
/// opaque-any value, degrading to display text as the last resort.
pub fn to_canonical_value(value: &log::kv::Value<'_>) -> Value {
    if let Some(b) = value.to_bool() {
        return Value::Bool(b);
    }
    if let Some(i) = value.to_i64() {
        return Value::Int64(i);
    }
    if let Some(u) = value.to_u64() {
        return Value::Uint64(u);
    }
    if let Some(f) = value.to_f64() {
        return Value::Float64(f);
    }
    if let Some(s) = value.to_borrowed_str() {
        return Value::String(s.to_string());
    }
    match serde_json::to_value(value) {
        Ok(json) => Value::Any(json),
        Err(_) => Value::String(value.to_string()),
    }
}
