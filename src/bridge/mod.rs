//! Adapter bridges translating foreign logging APIs into the canonical
//! model
//!
//! Each bridge owns the full type translation for one foreign API: levels
//! both ways, records and typed values into the canonical model. Bridges
//! are loss-tolerant; a value kind the translation does not recognize
//! becomes an opaque-any attribute instead of failing the log call.

pub mod log_crate;
pub mod tracing_core;

pub use log_crate::LogBridge;
pub use tracing_core::TracingBridge;
