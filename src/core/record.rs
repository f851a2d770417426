//! Log record structure

use super::level::Level;
use super::value::Attr;
use chrono::{DateTime, FixedOffset, Local};

/// One log event on its way to a handler.
///
/// Attributes attached here render after any attributes the handler chain
/// accumulated via `with_attrs`.
#[derive(Debug, Clone)]
pub struct Record {
    /// Absent timestamps are skipped by the renderers entirely.
    pub time: Option<DateTime<FixedOffset>>,
    pub level: Level,
    pub message: String,
    pub source: Option<Source>,
    pub attrs: Vec<Attr>,
}

/// Callsite position carried by a record; rendered only when the handler
/// has source capture enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub file: String,
    pub line: u32,
}

impl Source {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl Record {
    /// Sanitize the message to keep one record on one rendered line and to
    /// prevent forged entries via embedded line breaks.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Some(Local::now().fixed_offset()),
            level,
            message: Self::sanitize_message(&message.into()),
            source: None,
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }
}
