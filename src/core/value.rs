//! Canonical attribute and value model
//!
//! Every renderer and every adapter bridge operates on this model; foreign
//! attribute types are translated here before anything renders or compares
//! them.

use chrono::{DateTime, Duration, FixedOffset};
use std::fmt;
use std::sync::Arc;

/// Upper bound on chained lazy resolution, matching the guard the primary
/// logging ecosystems place on self-referential value providers.
const MAX_LAZY_DEPTH: usize = 100;

/// A key/value pair attached to a record or a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

/// Canonical tagged value union.
///
/// `Group` nests recursively; key uniqueness inside one group level is by
/// convention, not enforced. `Any` carries arbitrary structured data that
/// only generic serialization can render. `Lazy` defers evaluation until a
/// render actually needs the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    String(String),
    Duration(Duration),
    Timestamp(DateTime<FixedOffset>),
    Group(Vec<Attr>),
    Any(serde_json::Value),
    Error(String),
    Lazy(LazyValue),
}

/// A value evaluated at render time, exactly once per render and never
/// cached across records.
#[derive(Clone)]
pub struct LazyValue(Arc<dyn Fn() -> Value + Send + Sync>);

impl LazyValue {
    pub fn new(resolve: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(resolve))
    }

    pub fn resolve(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyValue(..)")
    }
}

impl PartialEq for LazyValue {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl Value {
    /// Evaluate lazy values until a concrete value remains. Each call
    /// re-runs the provider; results are never cached across renders.
    pub fn resolve(&self) -> Value {
        let mut value = self.clone();
        let mut depth = 0;
        while let Value::Lazy(lazy) = value {
            if depth >= MAX_LAZY_DEPTH {
                return Value::Error("lazy value resolved too many times".to_string());
            }
            value = lazy.resolve();
            depth += 1;
        }
        value
    }

    /// Project into `serde_json::Value` for the structured encoders.
    ///
    /// Durations become nanosecond counts, timestamps RFC 3339 strings and
    /// error values their textual message.
    pub fn to_json(&self) -> serde_json::Value {
        match self.resolve() {
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int64(i) => serde_json::Value::Number(i.into()),
            Value::Uint64(u) => serde_json::Value::Number(u.into()),
            Value::Float64(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Duration(d) => {
                serde_json::Value::Number(d.num_nanoseconds().unwrap_or(i64::MAX).into())
            }
            Value::Timestamp(t) => serde_json::Value::String(t.to_rfc3339()),
            Value::Group(attrs) => serde_json::Value::Object(
                attrs
                    .iter()
                    .map(|a| (a.key.clone(), a.value.to_json()))
                    .collect(),
            ),
            Value::Any(v) => v,
            Value::Error(message) => serde_json::Value::String(message),
            Value::Lazy(_) => serde_json::Value::Null,
        }
    }

    /// Lift a decoded JSON value into the canonical model, keeping scalars
    /// typed and leaving compound data opaque.
    pub fn from_json(value: serde_json::Value) -> Value {
        match value {
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint64(u)
                } else {
                    Value::Float64(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Any(other),
        }
    }
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int64(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint64(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float64(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    pub fn timestamp(key: impl Into<String>, value: DateTime<FixedOffset>) -> Self {
        Self::new(key, Value::Timestamp(value))
    }

    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }

    pub fn any(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self::new(key, Value::Any(value))
    }

    pub fn error(key: impl Into<String>, error: impl fmt::Display) -> Self {
        Self::new(key, Value::Error(error.to_string()))
    }

    pub fn lazy(key: impl Into<String>, resolve: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self::new(key, Value::Lazy(LazyValue::new(resolve)))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int64(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint64(u as u64)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint64(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Value::Group(attrs)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Any(v)
    }
}

impl From<LazyValue> for Value {
    fn from(lazy: LazyValue) -> Self {
        Value::Lazy(lazy)
    }
}
