//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Configuration could not be decoded into the expected shape
    #[error("config decode failed for key '{key}': {source}")]
    ConfigDecode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Output destination could not be opened for writing
    #[error("cannot open sink '{path}': {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Write to an already open sink failed
    #[error("write failed on sink '{target}': {source}")]
    SinkWrite {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Flush of a sink failed at shutdown
    #[error("flush failed on sink '{target}': {message}")]
    Flush { target: String, message: String },

    /// Multiple errors collected during an aggregated flush pass
    #[error("{}", join(.0))]
    Aggregate(Vec<LoggerError>),
}

fn join(errors: &[LoggerError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoggerError {
    /// Create a config decode error
    pub fn config_decode(key: impl Into<String>, source: serde_json::Error) -> Self {
        LoggerError::ConfigDecode {
            key: key.into(),
            source,
        }
    }

    /// Create a sink open error
    pub fn sink_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a sink write error
    pub fn sink_write(target: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            target: target.into(),
            source,
        }
    }

    /// Create a flush error
    pub fn flush(target: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Flush {
            target: target.into(),
            message: message.into(),
        }
    }

    /// True when every sink referenced by this error is one of the two
    /// standard process streams. Shutdown orchestrators treat such flush
    /// failures as benign; some platforms reject flushing stdout/stderr.
    pub fn is_std_stream(&self) -> bool {
        match self {
            LoggerError::SinkWrite { target, .. } | LoggerError::Flush { target, .. } => {
                target == "stdout" || target == "stderr"
            }
            LoggerError::Aggregate(errors) => errors.iter().all(|e| e.is_std_stream()),
            _ => false,
        }
    }
}

/// Combine flush errors the way an aggregated shutdown pass needs: `None`
/// plus an error yields that error, anything else grows the aggregate.
/// No error is ever replaced or dropped.
pub fn append(left: Option<LoggerError>, right: LoggerError) -> LoggerError {
    match left {
        None => right,
        Some(LoggerError::Aggregate(mut errors)) => {
            errors.push(right);
            LoggerError::Aggregate(errors)
        }
        Some(single) => LoggerError::Aggregate(vec![single, right]),
    }
}
