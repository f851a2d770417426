//! Record renderers: console, plain text and JSON lines

pub mod console;
pub mod json;
pub mod text;

pub use console::ConsoleHandler;
pub use json::JsonHandler;
pub use text::TextHandler;

use crate::core::{Attr, Handler, HandlerOptions, Level};
use crate::sink::Sink;
use std::sync::Arc;

/// Select a renderer by its configured encoding name, case-insensitively.
/// Unrecognized encodings fall back to JSON.
pub fn new_handler(sink: Arc<Sink>, encoding: &str, opts: HandlerOptions) -> Arc<dyn Handler> {
    match encoding.to_lowercase().as_str() {
        "console" => Arc::new(ConsoleHandler::new(sink, opts)),
        "text" => Arc::new(TextHandler::new(sink, opts)),
        _ => Arc::new(JsonHandler::new(sink, opts)),
    }
}

/// Composition state shared by every renderer: options, destination and
/// the accumulated attribute/group lineage.
///
/// `with_attrs`/`with_group` clone the state defensively so handlers that
/// share a lineage never observe each other's additions. Each accumulated
/// attribute remembers how many groups were open when it was attached;
/// the structured encoders use that depth to nest it correctly.
#[derive(Clone)]
pub(crate) struct HandlerState {
    pub(crate) opts: HandlerOptions,
    pub(crate) sink: Arc<Sink>,
    pub(crate) global: Vec<(usize, Attr)>,
    pub(crate) groups: Vec<String>,
}

impl HandlerState {
    pub(crate) fn new(sink: Arc<Sink>, opts: HandlerOptions) -> Self {
        Self {
            opts,
            sink,
            global: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        level >= self.opts.min_level()
    }

    pub(crate) fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        let mut state = self.clone();
        let depth = state.groups.len();
        state.global.extend(attrs.into_iter().map(|a| (depth, a)));
        state
    }

    pub(crate) fn with_group(&self, name: &str) -> Self {
        let mut state = self.clone();
        state.groups.push(name.to_string());
        state
    }
}
