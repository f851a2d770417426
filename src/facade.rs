//! User-facing logger facade
//!
//! Builds the base logger from configuration, hands out named and
//! channel-scoped loggers (plus views typed for the bridged APIs), and
//! flushes every sink realized over its lifetime in one aggregated pass.

use crate::bridge::{LogBridge, TracingBridge};
use crate::core::error::{self, LoggerError, Result};
use crate::core::{
    new_channel_config, new_config, Attr, ChannelConfig, Config, Configurer, Handler, Logger,
    Value, CONFIG_KEY,
};
use crate::handlers::new_handler;
use crate::sink::{Sink, SyncHandler};
use parking_lot::RwLock;
use std::sync::Arc;

/// Process-wide logging facade. Created once at startup from decoded
/// configuration; the registry of flushable handlers grows as channels are
/// first requested and is drained by [`Log::sync`] at shutdown.
///
/// The facade is a caller-held handle; constructing it installs no global
/// default logger.
pub struct Log {
    attrs: Vec<Attr>,
    base: Logger,
    channels: ChannelConfig,
    syncs: RwLock<Vec<Arc<dyn Handler>>>,
}

impl Log {
    /// Build the base logger. A sink that cannot be opened here is fatal
    /// to startup.
    pub fn new(cfg: Config, channels: ChannelConfig, attrs: Vec<Attr>) -> Result<Self> {
        let base = build_logger(&cfg, &attrs)?;
        let syncs = RwLock::new(vec![Arc::clone(base.handler())]);
        Ok(Self {
            attrs,
            base,
            channels,
            syncs,
        })
    }

    pub fn base_logger(&self) -> &Logger {
        &self.base
    }

    /// Channel-scoped logger. A configured channel gets its own handler
    /// chain and sink, merged with the facade attributes and registered
    /// for the shutdown flush; any other name is a group-scoped view over
    /// the base logger. A sink failure here is fatal only to the channel.
    pub fn named_logger(&self, name: &str) -> Result<Logger> {
        if let Some(cfg) = self.channels.channels.get(name) {
            let logger = build_logger(cfg, &self.attrs)?;

            self.syncs.write().push(Arc::clone(logger.handler()));

            Ok(logger.with_group(name))
        } else {
            Ok(self.base.with_group(name))
        }
    }

    /// The same named logger viewed through the `log` crate's API.
    pub fn named_log_bridge(&self, name: &str) -> Result<LogBridge> {
        Ok(LogBridge::new(self.named_logger(name)?))
    }

    /// The same named logger viewed through the `tracing` collector API.
    pub fn named_tracing_bridge(&self, name: &str) -> Result<TracingBridge> {
        Ok(TracingBridge::new(self.named_logger(name)?))
    }

    /// Flush every registered handler and the base handler, aggregating
    /// all failures. Callers apply the standard-stream convention via
    /// [`LoggerError::is_std_stream`]; flushes of stdout/stderr are
    /// commonly rejected and treated as benign.
    pub fn sync(&self) -> Result<()> {
        let syncs = self.syncs.read();

        let mut err: Option<LoggerError> = None;
        for handler in syncs.iter() {
            if let Err(e) = handler.flush() {
                err = Some(error::append(err, e));
            }
        }
        if let Err(e) = self.base.handler().flush() {
            err = Some(error::append(err, e));
        }

        match err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn build_logger(cfg: &Config, attrs: &[Attr]) -> Result<Logger> {
    let sink = Arc::new(Sink::open(&cfg.output_paths)?);
    let handler = new_handler(Arc::clone(&sink), &cfg.encoding, cfg.handler_options());

    let mut merged = cfg.attrs();
    merged.extend(attrs.iter().cloned());
    let handler = handler.with_attrs(merged);

    Ok(Logger::new(Arc::new(SyncHandler::new(sink, handler))))
}

/// Construction entry point: decode the facade's configuration key and
/// build a ready [`Log`] stamped with the configuration's version.
pub fn load(cfg: &dyn Configurer) -> Result<Log> {
    let config = new_config(cfg, CONFIG_KEY)?;
    let channels = new_channel_config(cfg, CONFIG_KEY)?;

    Log::new(
        config,
        channels,
        vec![Attr::new(
            "version",
            Value::String(cfg.version().to_string()),
        )],
    )
}
