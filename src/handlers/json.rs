//! JSON-lines renderer
//!
//! One JSON object per record: `time`, `level`, `msg`, optional `source`,
//! then the accumulated and record attributes. Open groups become nested
//! objects; attributes attached before a group opened stay at their outer
//! depth.

use super::HandlerState;
use crate::core::{Attr, Handler, HandlerOptions, Level, Record, Result};
use crate::sink::Sink;
use std::sync::Arc;

pub struct JsonHandler {
    state: HandlerState,
}

impl JsonHandler {
    pub fn new(sink: Arc<Sink>, opts: HandlerOptions) -> Self {
        Self {
            state: HandlerState::new(sink, opts),
        }
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        self.state.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut root = serde_json::Map::new();

        if let Some(time) = record.time {
            root.insert(
                "time".to_string(),
                serde_json::Value::String(time.to_rfc3339()),
            );
        }
        root.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.to_str().to_string()),
        );
        root.insert(
            "msg".to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        if self.state.opts.add_source {
            if let Some(source) = &record.source {
                root.insert(
                    "source".to_string(),
                    serde_json::Value::String(format!("{}:{}", source.file, source.line)),
                );
            }
        }

        // one attribute map per open-group depth, folded innermost-first so
        // empty groups are elided
        let depth = self.state.groups.len();
        let mut levels: Vec<serde_json::Map<String, serde_json::Value>> =
            vec![serde_json::Map::new(); depth + 1];

        for (d, attr) in &self.state.global {
            insert_attr(&mut levels[(*d).min(depth)], attr);
        }
        for attr in &record.attrs {
            insert_attr(&mut levels[depth], attr);
        }

        for d in (1..=depth).rev() {
            let map = std::mem::take(&mut levels[d]);
            if !map.is_empty() {
                levels[d - 1].insert(
                    self.state.groups[d - 1].clone(),
                    serde_json::Value::Object(map),
                );
            }
        }
        for (key, value) in std::mem::take(&mut levels[0]) {
            root.insert(key, value);
        }

        let mut line =
            serde_json::to_string(&serde_json::Value::Object(root)).unwrap_or_default();
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

fn insert_attr(map: &mut serde_json::Map<String, serde_json::Value>, attr: &Attr) {
    map.insert(attr.key.clone(), attr.value.to_json());
}
