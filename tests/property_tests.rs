//! Property-style tests for the canonical model and its bridges
//!
//! Pins the contracts the facade guarantees: translation round-trips,
//! monotonic level mapping, handler immutability and the exact console
//! line shape.

use parking_lot::Mutex;
use rust_log_facade::bridge::{log_crate, tracing_core};
use rust_log_facade::core::{Attr, Handler, HandlerOptions, LazyValue, Level, Record, Value};
use rust_log_facade::handlers::ConsoleHandler;
use rust_log_facade::sink::Sink;
use std::sync::Arc;

fn console_over_buffer(opts: HandlerOptions) -> (Arc<dyn Handler>, Arc<Mutex<Vec<u8>>>) {
    colored::control::set_override(false);
    let buf = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::new(Sink::buffer(Arc::clone(&buf)));
    let handler: Arc<dyn Handler> = Arc::new(ConsoleHandler::new(sink, opts));
    (handler, buf)
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
fn property_log_level_round_trip_and_monotonic() {
    for level in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
        assert_eq!(
            log_crate::to_canonical_level(log_crate::from_canonical_level(level)),
            level
        );
    }

    let foreign = [
        log::Level::Trace,
        log::Level::Debug,
        log::Level::Info,
        log::Level::Warn,
        log::Level::Error,
    ];
    for pair in foreign.windows(2) {
        assert!(log_crate::to_canonical_level(pair[0]) <= log_crate::to_canonical_level(pair[1]));
    }
}

#[test]
fn property_tracing_level_round_trip_and_monotonic() {
    for level in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
        assert_eq!(
            tracing_core::to_canonical_level(tracing_core::from_canonical_level(level)),
            level
        );
    }

    let foreign = [
        tracing::Level::TRACE,
        tracing::Level::DEBUG,
        tracing::Level::INFO,
        tracing::Level::WARN,
        tracing::Level::ERROR,
    ];
    for pair in foreign.windows(2) {
        assert!(
            tracing_core::to_canonical_level(pair[0]) <= tracing_core::to_canonical_level(pair[1])
        );
    }
}

#[test]
fn property_kv_round_trip_for_expressible_kinds() {
    // kinds the kv type system can express stay typed across the bridge
    let cases = [
        Value::Bool(true),
        Value::Int64(-42),
        Value::Uint64(u64::MAX),
        Value::Float64(2.25),
        Value::String("payload".to_string()),
    ];

    for canonical in cases {
        let translated = match &canonical {
            Value::Bool(b) => log_crate::to_canonical_value(&log::kv::Value::from(*b)),
            Value::Int64(i) => log_crate::to_canonical_value(&log::kv::Value::from(*i)),
            Value::Uint64(u) => log_crate::to_canonical_value(&log::kv::Value::from(*u)),
            Value::Float64(f) => log_crate::to_canonical_value(&log::kv::Value::from(*f)),
            Value::String(s) => log_crate::to_canonical_value(&log::kv::Value::from(s.as_str())),
            _ => unreachable!(),
        };
        assert_eq!(translated, canonical);
    }
}

#[test]
fn property_opaque_any_preserves_serialized_form() {
    #[derive(serde::Serialize)]
    struct Shape {
        sides: u32,
        regular: bool,
    }

    let value = log::kv::Value::from_serde(&Shape {
        sides: 6,
        regular: true,
    });

    match log_crate::to_canonical_value(&value) {
        Value::Any(json) => {
            assert_eq!(
                serde_json::to_string(&json).unwrap(),
                "{\"sides\":6,\"regular\":true}"
            );
        }
        other => panic!("expected opaque any, got {:?}", other),
    }
}

#[test]
fn property_with_attrs_never_mutates_receiver() {
    let (h1, buf) = console_over_buffer(HandlerOptions::default());
    let h2 = h1.with_attrs(vec![Attr::string("tenant", "acme")]);

    let mut rec = record(Level::Info, "first");
    h1.handle(&rec).unwrap();
    rec.message = "second".to_string();
    h2.handle(&rec).unwrap();

    let out = rendered(&buf);
    let lines: Vec<&str> = out.lines().collect();
    assert!(!lines[0].contains("tenant"));
    assert!(lines[1].contains("\"tenant\": \"acme\""));
}

#[test]
fn property_with_group_never_mutates_receiver() {
    let (h1, buf) = console_over_buffer(HandlerOptions::default());
    let h2 = h1.with_group("http");

    h1.handle(&record(Level::Info, "plain")).unwrap();
    h2.handle(&record(Level::Info, "grouped")).unwrap();

    let out = rendered(&buf);
    let lines: Vec<&str> = out.lines().collect();
    assert!(!lines[0].contains("http"));
    assert!(lines[1].contains("http"));
}

#[test]
fn property_console_line_shape() {
    let (handler, buf) = console_over_buffer(HandlerOptions::default());
    let mut rec = record(Level::Info, "started");
    rec.add_attrs(vec![Attr::int("port", 8080)]);
    handler.handle(&rec).unwrap();

    let expected_tail = format!("started{}{{\"port\": 8080}}\n", " ".repeat(19));
    assert!(
        rendered(&buf).ends_with(&expected_tail),
        "got: {:?}",
        rendered(&buf)
    );
}

#[test]
fn property_braces_only_when_attrs_present() {
    let (handler, buf) = console_over_buffer(HandlerOptions::default());
    handler.handle(&record(Level::Info, "bare")).unwrap();
    assert!(!rendered(&buf).contains('{'));
}

#[test]
fn property_nested_groups_render_dotted_path() {
    let (handler, buf) = console_over_buffer(HandlerOptions::default());
    let scoped = handler.with_group("http").with_group("request");

    let mut rec = record(Level::Info, "handled");
    rec.add_attrs(vec![Attr::int("latency_ms", 12)]);
    scoped.handle(&rec).unwrap();

    let out = rendered(&buf);
    assert!(out.contains("http.request"));
    assert!(out.contains("\"latency_ms\": 12"));
    assert!(!out.contains("http.request.latency_ms"));
}

#[test]
fn property_unknown_tracing_kind_becomes_opaque() {
    colored::control::set_override(false);
    let buf = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::new(Sink::buffer(Arc::clone(&buf)));
    let handler = Arc::new(ConsoleHandler::new(sink, HandlerOptions::default()));
    let bridge =
        rust_log_facade::bridge::TracingBridge::new(rust_log_facade::core::Logger::new(handler));

    tracing::subscriber::with_default(bridge, || {
        // a debug-only value has no typed visitor arm
        tracing::info!(state = ?vec![1, 2, 3], "snapshot");
    });

    let out = rendered(&buf);
    assert!(out.contains("\"state\": \"[1, 2, 3]\""), "got: {:?}", out);
}

#[test]
fn property_lazy_resolves_per_render_not_before() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let lazy = Attr::new(
        "expensive",
        Value::Lazy(LazyValue::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::Int64(99)
        })),
    );

    let (handler, buf) = console_over_buffer(HandlerOptions::default());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let mut rec = record(Level::Info, "one");
    rec.add_attrs(vec![lazy.clone()]);
    handler.handle(&rec).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let mut rec = record(Level::Info, "two");
    rec.add_attrs(vec![lazy]);
    handler.handle(&rec).unwrap();
    // never cached across records
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    assert!(rendered(&buf).contains("\"expensive\": 99"));
}

#[test]
fn property_duration_and_timestamp_render_typed() {
    let (handler, buf) = console_over_buffer(HandlerOptions::default());
    let ts: chrono::DateTime<chrono::FixedOffset> = "2025-06-01T12:00:00+02:00".parse().unwrap();

    let mut rec = record(Level::Info, "timing");
    rec.add_attrs(vec![
        Attr::duration("elapsed", chrono::Duration::milliseconds(250)),
        Attr::timestamp("deadline", ts),
    ]);
    handler.handle(&rec).unwrap();

    let out = rendered(&buf);
    assert!(out.contains("\"elapsed\": 250000000"));
    assert!(out.contains("\"deadline\": \"2025-06-01T12:00:00+02:00\""));
}
