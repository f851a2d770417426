//! Core facade types and traits

pub mod config;
pub mod error;
pub mod handler;
pub mod level;
pub mod logger;
pub mod record;
pub mod value;

pub use config::{new_channel_config, new_config, ChannelConfig, Config, Configurer, CONFIG_KEY};
pub use error::{LoggerError, Result};
pub use handler::{Handler, HandlerOptions};
pub use level::Level;
pub use logger::Logger;
pub use record::{Record, Source};
pub use value::{Attr, LazyValue, Value};
