//! Plain-text (logfmt) renderer
//!
//! `key=value` pairs separated by single spaces; nested group membership
//! shows up as a dotted key prefix. Values quote themselves only when they
//! contain characters that would break the format.

use super::HandlerState;
use crate::core::{Attr, Handler, HandlerOptions, Level, Record, Result, Value};
use crate::sink::Sink;
use std::sync::Arc;

pub struct TextHandler {
    state: HandlerState,
}

impl TextHandler {
    pub fn new(sink: Arc<Sink>, opts: HandlerOptions) -> Self {
        Self {
            state: HandlerState::new(sink, opts),
        }
    }
}

impl Handler for TextHandler {
    fn enabled(&self, level: Level) -> bool {
        self.state.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut parts = Vec::new();

        if let Some(time) = record.time {
            parts.push(format!("time={}", escape_value(&time.to_rfc3339())));
        }
        parts.push(format!("level={}", record.level.to_str()));
        parts.push(format!("msg={}", quote_value(&record.message)));
        if self.state.opts.add_source {
            if let Some(source) = &record.source {
                parts.push(format!(
                    "source={}",
                    escape_value(&format!("{}:{}", source.file, source.line))
                ));
            }
        }

        for (d, attr) in &self.state.global {
            let depth = (*d).min(self.state.groups.len());
            push_attr(&mut parts, &self.state.groups[..depth], attr);
        }
        for attr in &record.attrs {
            push_attr(&mut parts, &self.state.groups, attr);
        }

        let mut line = parts.join(" ");
        line.push('\n');
        self.state.sink.write_line(line.as_bytes())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(Self {
            state: self.state.with_attrs(attrs),
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(Self {
            state: self.state.with_group(name),
        })
    }

    fn flush(&self) -> Result<()> {
        self.state.sink.flush()
    }
}

fn push_attr(parts: &mut Vec<String>, groups: &[String], attr: &Attr) {
    let value = attr.value.resolve();
    match value {
        Value::Group(attrs) => {
            let mut path = groups.to_vec();
            path.push(attr.key.clone());
            for a in &attrs {
                push_attr(parts, &path, a);
            }
        }
        other => {
            let key = if groups.is_empty() {
                attr.key.clone()
            } else {
                format!("{}.{}", groups.join("."), attr.key)
            };
            parts.push(format!("{}={}", escape_key(&key), format_scalar(&other)));
        }
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int64(i) => i.to_string(),
        Value::Uint64(u) => u.to_string(),
        Value::Float64(f) => f.to_string(),
        Value::String(s) => escape_value(s),
        Value::Duration(d) => d.num_nanoseconds().unwrap_or(i64::MAX).to_string(),
        Value::Timestamp(t) => escape_value(&t.to_rfc3339()),
        Value::Error(message) => escape_value(message),
        Value::Any(v) => escape_value(&serde_json::to_string(v).unwrap_or_default()),
        // groups are flattened and lazy values resolved by the caller
        Value::Group(_) | Value::Lazy(_) => String::new(),
    }
}

/// Strip characters that would break a key token.
fn escape_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect()
}

/// Quote a value only when it needs it.
fn escape_value(value: &str) -> String {
    if value.contains(' ') || value.contains('"') || value.contains('=') {
        quote_value(value)
    } else {
        value.to_string()
    }
}

fn quote_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
