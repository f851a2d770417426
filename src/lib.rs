//! # Rust Log Facade
//!
//! A channel-scoped structured logging facade. Application code asks for
//! named loggers; the facade keeps one canonical attribute/record model
//! underneath and bridges the `log` and `tracing` ecosystems onto it.
//!
//! ## Features
//!
//! - **Channel Loggers**: per-channel sinks, levels and encodings, with a
//!   shared base logger for everything else
//! - **Three Renderers**: colorized console lines, logfmt text and JSON
//!   lines
//! - **Adapter Bridges**: `log::Log` and `tracing::Subscriber` views over
//!   the same loggers
//! - **Coordinated Shutdown**: every sink realized over the facade's
//!   lifetime flushes exactly once, errors aggregated

pub mod bridge;
pub mod core;
pub mod facade;
pub mod handlers;
pub mod macros;
pub mod sink;

pub mod prelude {
    pub use crate::bridge::{LogBridge, TracingBridge};
    pub use crate::core::{
        Attr, ChannelConfig, Config, Configurer, Handler, HandlerOptions, LazyValue, Level,
        LoggerError, Logger, Record, Result, Source, Value,
    };
    pub use crate::facade::{load, Log};
    pub use crate::handlers::{ConsoleHandler, JsonHandler, TextHandler};
    pub use crate::sink::{Sink, SyncHandler};
}

pub use bridge::{LogBridge, TracingBridge};
pub use core::{
    Attr, ChannelConfig, Config, Configurer, Handler, HandlerOptions, LazyValue, Level,
    LoggerError, Logger, Record, Result, Source, Value,
};
pub use facade::{load, Log};
pub use handlers::{ConsoleHandler, JsonHandler, TextHandler};
pub use sink::{Sink, SyncHandler};
