//! Colorized human-readable console renderer
//!
//! Formats one record into exactly one line: padded timestamp, colorized
//! level token, dotted group path, padded message, then all attributes in
//! JSON-ish braces. The whole line goes to the sink in a single write.

use super::HandlerState;
use crate::core::{Attr, Handler, HandlerOptions, Level, Record, Result, Value};
use crate::sink::Sink;
use colored::Colorize;
use std::sync::Arc;

const TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

pub struct ConsoleHandler {
    state: HandlerState,
}

impl ConsoleHandler {
    pub fn new(sink: Arc<Sink>, opts: HandlerOptions) -> Self {
        Self {
            state: HandlerState::new(sink, opts),
        }
    }
}

impl Handler for ConsoleHandler {
    fn enabled(&self, level: Level) -> bool {
        self.state.enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut line = String::new();

        if let Some(time) = record.time {
            line.push_str(&spaces(&time.format(TIME_LAYOUT).to_string(), 31));
        }

        line.push_str(&colored_level(record.level));

        if !self.state.groups.is_empty() {
            line.push_str(&colored_group(&self.state.groups.join(".")));
        }

        if !record.message.is_empty() {
            line.push_str(&spaces(&record.message, 24));
        }

        let mut attrs = String::new();
        let mut sep = "";
        for (_, attr) in &self.state.global {
            sep = render_attr(&mut attrs, sep, attr);
        }
        for attr in &record.attrs {
            sep = render_attr(&mut attrs, sep, attr);
        }
        if self.state.opts.add_source {
            if let Some(source) = &record.source {
                attrs.push_str(sep);
                attrs.push_str(&format!("\"source\": \"{}:{}\"", source.file, source.line));
            }
        }

        if !attrs.is_empty() {
            line.push_str(" {");
            line.push_str(&attrs);
            line.push('}');
        }

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

/// Render one attribute after the given separator and return the separator
/// for whatever follows. Groups nest recursively with no separator before
/// their first member; error values render as their bare message; anything
/// else is JSON-encoded on its own, and an encoding failure degrades to an
/// empty value rather than aborting the line.
fn render_attr(buf: &mut String, sep: &'static str, attr: &Attr) -> &'static str {
    let value = attr.value.resolve();
    buf.push_str(sep);
    buf.push('"');
    buf.push_str(&attr.key);
    buf.push_str("\": ");

    match value {
        Value::Group(attrs) => {
            buf.push('{');
            let mut inner = "";
            for a in &attrs {
                inner = render_attr(buf, inner, a);
            }
            buf.push('}');
        }
        Value::Error(message) => buf.push_str(&message),
        other => {
            buf.push_str(&serde_json::to_string(&other.to_json()).unwrap_or_default());
        }
    }

    ", "
}

/// Pad to a minimum width, then one separating space. Tokens already at or
/// past the width get only the separating space.
fn spaces(s: &str, min: usize) -> String {
    if s.len() < min {
        format!("{}{} ", s, " ".repeat(min - s.len()))
    } else {
        format!("{} ", s)
    }
}

fn colored_level(level: Level) -> String {
    spaces(level.to_str(), 7).color(level.color_code()).to_string()
}

fn colored_group(group: &str) -> String {
    spaces(group, 16).bright_green().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Source;
    use parking_lot::Mutex;

    fn capture(opts: HandlerOptions) -> (ConsoleHandler, Arc<Mutex<Vec<u8>>>) {
        colored::control::set_override(false);
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::new(Sink::buffer(Arc::clone(&buf)));
        (ConsoleHandler::new(sink, opts), buf)
    }

    fn rendered(buf: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buf.lock().clone()).unwrap()
    }

    fn record(level: Level, message: &str) -> Record {
        let mut record = Record::new(level, message);
        record.time = None;
        record
    }

    #[test]
    fn test_basic_line_shape() {
        let (handler, buf) = capture(HandlerOptions::default());
        let mut rec = record(Level::Info, "started");
        rec.add_attrs(vec![Attr::int("port", 8080)]);
        handler.handle(&rec).unwrap();

        // 17 pad chars to reach column 24, one separating space, then the
        // single space that prefixes the attribute braces
        let expected_tail = format!("started{}{{\"port\": 8080}}\n", " ".repeat(19));
        assert!(
            rendered(&buf).ends_with(&expected_tail),
            "got: {:?}",
            rendered(&buf)
        );
    }

    #[test]
    fn test_no_attrs_no_braces() {
        let (handler, buf) = capture(HandlerOptions::default());
        handler.handle(&record(Level::Info, "plain")).unwrap();
        let out = rendered(&buf);
        assert!(!out.contains('{'));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_timestamp_padded_to_column() {
        let (handler, buf) = capture(HandlerOptions::default());
        let mut rec = record(Level::Info, "timed");
        rec.time = Some("2025-01-08T10:30:45.123+01:00".parse().unwrap());
        handler.handle(&rec).unwrap();

        let out = rendered(&buf);
        // layout is 28 chars, padded to 31 plus the separating space
        assert!(out.starts_with("2025-01-08T10:30:45.123+0100    "));
    }

    #[test]
    fn test_group_path_renders_dotted() {
        let (handler, buf) = capture(HandlerOptions::default());
        let scoped = handler.with_group("http").with_group("request");
        let mut rec = record(Level::Info, "handled");
        rec.add_attrs(vec![Attr::int("status", 200)]);
        scoped.handle(&rec).unwrap();

        let out = rendered(&buf);
        assert!(out.contains("http.request"));
        // inner attribute keys are not re-prefixed with the path
        assert!(out.contains("{\"status\": 200}"));
        assert!(!out.contains("http.request.status"));
    }

    #[test]
    fn test_global_attrs_render_before_record_attrs() {
        let (handler, buf) = capture(HandlerOptions::default());
        let scoped = handler.with_attrs(vec![Attr::string("version", "1.2.3")]);
        let mut rec = record(Level::Info, "ready");
        rec.add_attrs(vec![Attr::bool("tls", true)]);
        scoped.handle(&rec).unwrap();

        let out = rendered(&buf);
        assert!(out.contains("{\"version\": \"1.2.3\", \"tls\": true}"));
    }

    #[test]
    fn test_nested_group_value() {
        let (handler, buf) = capture(HandlerOptions::default());
        let mut rec = record(Level::Info, "req");
        rec.add_attrs(vec![Attr::group(
            "peer",
            vec![Attr::string("host", "10.0.0.1"), Attr::int("port", 443)],
        )]);
        handler.handle(&rec).unwrap();

        assert!(rendered(&buf)
            .contains("{\"peer\": {\"host\": \"10.0.0.1\", \"port\": 443}}"));
    }

    #[test]
    fn test_error_value_renders_bare_message() {
        let (handler, buf) = capture(HandlerOptions::default());
        let mut rec = record(Level::Error, "failed");
        rec.add_attrs(vec![Attr::error("cause", "connection refused")]);
        handler.handle(&rec).unwrap();

        assert!(rendered(&buf).contains("{\"cause\": connection refused}"));
    }

    #[test]
    fn test_lazy_value_resolved_at_render() {
        let (handler, buf) = capture(HandlerOptions::default());
        let mut rec = record(Level::Info, "lazy");
        rec.add_attrs(vec![Attr::lazy("queue_depth", || Value::Int64(17))]);
        handler.handle(&rec).unwrap();

        assert!(rendered(&buf).contains("{\"queue_depth\": 17}"));
    }

    #[test]
    fn test_source_appended_with_separator() {
        let (handler, buf) = capture(HandlerOptions {
            add_source: true,
            ..Default::default()
        });
        let mut rec = record(Level::Info, "located");
        rec.source = Some(Source::new("src/main.rs", 42));
        rec.add_attrs(vec![Attr::int("n", 1)]);
        handler.handle(&rec).unwrap();

        assert!(rendered(&buf).contains("{\"n\": 1, \"source\": \"src/main.rs:42\"}"));
    }

    #[test]
    fn test_source_alone_has_no_leading_separator() {
        let (handler, buf) = capture(HandlerOptions {
            add_source: true,
            ..Default::default()
        });
        let mut rec = record(Level::Info, "located");
        rec.source = Some(Source::new("src/main.rs", 42));
        handler.handle(&rec).unwrap();

        assert!(rendered(&buf).contains(" {\"source\": \"src/main.rs:42\"}\n"));
    }

    #[test]
    fn test_source_suppressed_without_option() {
        let (handler, buf) = capture(HandlerOptions::default());
        let mut rec = record(Level::Info, "located");
        rec.source = Some(Source::new("src/main.rs", 42));
        handler.handle(&rec).unwrap();

        assert!(!rendered(&buf).contains("source"));
    }

    #[test]
    fn test_level_filtering() {
        let (handler, buf) = capture(HandlerOptions {
            level: Some(Level::Warn),
            ..Default::default()
        });
        assert!(!handler.enabled(Level::Info));
        assert!(handler.enabled(Level::Error));
        drop(buf);
    }

    #[test]
    fn test_long_message_gets_single_trailing_space() {
        let (handler, buf) = capture(HandlerOptions::default());
        let msg = "a message well past the twenty-four column minimum";
        let mut rec = record(Level::Info, msg);
        rec.add_attrs(vec![Attr::int("n", 1)]);
        handler.handle(&rec).unwrap();

        // one separating space from padding, one prefixing the braces
        assert!(rendered(&buf).contains(&format!("{}  {{\"n\": 1}}", msg)));
    }
}
