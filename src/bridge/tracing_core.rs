//! Bridge implementing the `tracing` collector surface over a canonical
//! logger
//!
//! Covers the capability surface a high-performance structured core
//! expects: enabled checks, contextual field accumulation (spans stand in
//! for `with`-style child loggers), event writes and flush. Event targets
//! carrying `::` or `.` separators are split and applied as nested group
//! names, reconstructing a hierarchical channel name from the flat dotted
//! one.

use crate::core::{Attr, Level, Logger, Record, Source, Value};
use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::field::{Field, Visit};
use tracing::span;
use tracing::{Event, Metadata};

pub struct TracingBridge {
    logger: Logger,
    spans: Mutex<HashMap<u64, SpanData>>,
    next_id: AtomicU64,
}

struct SpanData {
    attrs: Vec<Attr>,
    refs: usize,
}

thread_local! {
    static SPAN_STACK: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

impl TracingBridge {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            spans: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn flush(&self) -> crate::core::Result<()> {
        self.logger.handler().flush()
    }

    /// Fields of every span the current thread is inside, outermost first.
    fn contextual_attrs(&self) -> Vec<Attr> {
        SPAN_STACK.with(|stack| {
            let stack = stack.borrow();
            let spans = self.spans.lock();
            let mut attrs = Vec::new();
            for id in stack.iter() {
                if let Some(data) = spans.get(id) {
                    attrs.extend(data.attrs.iter().cloned());
                }
            }
            attrs
        })
    }
}

impl tracing::Subscriber for TracingBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.logger.enabled(to_canonical_level(*metadata.level()))
    }

    fn new_span(&self, span: &span::Attributes<'_>) -> span::Id {
        let mut visitor = FieldVisitor::default();
        span.record(&mut visitor);

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.spans.lock().insert(
            id,
            SpanData {
                attrs: visitor.attrs,
                refs: 1,
            },
        );
        span::Id::from_u64(id)
    }

    fn record(&self, span: &span::Id, values: &span::Record<'_>) {
        let mut visitor = FieldVisitor::default();
        values.record(&mut visitor);
        if let Some(data) = self.spans.lock().get_mut(&span.into_u64()) {
            data.attrs.extend(visitor.attrs);
        }
    }

    fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

    fn event(&self, event: &Event<'_>) {
        let metadata = event.metadata();
        let level = to_canonical_level(*metadata.level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut logger = self.logger.clone();
        for name in split_logger_name(metadata.target()) {
            logger = logger.with_group(name);
        }

        let mut record = Record::new(level, visitor.message.unwrap_or_default());
        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            record.source = Some(Source::new(file, line));
        }
        record.add_attrs(self.contextual_attrs());
        record.add_attrs(visitor.attrs);

        logger.log_record(&record);
    }

    fn enter(&self, span: &span::Id) {
        SPAN_STACK.with(|stack| stack.borrow_mut().push(span.into_u64()));
    }

    fn exit(&self, span: &span::Id) {
        SPAN_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|id| *id == span.into_u64()) {
                stack.remove(pos);
            }
        });
    }

    fn clone_span(&self, id: &span::Id) -> span::Id {
        if let Some(data) = self.spans.lock().get_mut(&id.into_u64()) {
            data.refs += 1;
        }
        id.clone()
    }

    fn try_close(&self, id: span::Id) -> bool {
        let mut spans = self.spans.lock();
        if let Some(data) = spans.get_mut(&id.into_u64()) {
            data.refs -= 1;
            if data.refs == 0 {
                spans.remove(&id.into_u64());
                return true;
            }
        }
        false
    }
}

/// A flat dotted logger name becomes a chain of nested groups.
fn split_logger_name(target: &str) -> impl Iterator<Item = &str> {
    target
        .split("::")
        .flat_map(|part| part.split('.'))
        .filter(|part| !part.is_empty())
}

pub fn to_canonical_level(level: tracing::Level) -> Level {
    if level == tracing::Level::TRACE || level == tracing::Level::DEBUG {
        Level::Debug
    } else if level == tracing::Level::INFO {
        Level::Info
    } else if level == tracing::Level::WARN {
        Level::Warn
    } else {
        // anything more severe than warn never downgrades
        Level::Error
    }
}

pub fn from_canonical_level(level: Level) -> tracing::Level {
    match level {
        Level::Debug => tracing::Level::DEBUG,
        Level::Info => tracing::Level::INFO,
        Level::Warn => tracing::Level::WARN,
        Level::Error => tracing::Level::ERROR,
    }
}

/// Collects typed event and span fields into canonical attributes.
///
/// All float widths arrive through the f64 arm, and the 128-bit integer
/// arms narrow through the 64-bit conversions when the value fits,
/// degrading to opaque text otherwise. Kinds with no typed arm fall back
/// to the debug arm and become opaque-any.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    attrs: Vec<Attr>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: Value) {
        self.attrs.push(Attr::new(field.name(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::Float64(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::Int64(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::Uint64(value));
    }

    fn record_i128(&mut self, field: &Field, value: i128) {
        match i64::try_from(value) {
            Ok(v) => self.push(field, Value::Int64(v)),
            Err(_) => self.push(
                field,
                Value::Any(serde_json::Value::String(value.to_string())),
            ),
        }
    }

    fn record_u128(&mut self, field: &Field, value: u128) {
        match u64::try_from(value) {
            Ok(v) => self.push(field, Value::Uint64(v)),
            Err(_) => self.push(
                field,
                Value::Any(serde_json::Value::String(value.to_string())),
            ),
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push(field, Value::String(value.to_string()));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::Error(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(text);
        } else {
            self.push(field, Value::Any(serde_json::Value::String(text)));
        }
    }
}
