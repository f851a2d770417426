//! Output sink resolution and lifecycle
//!
//! A [`Sink`] resolves one or more destination descriptors (file paths or
//! the well-known names `stdout`/`stderr`) into a single flushable
//! destination; multiple descriptors tee every line to all of them. Each
//! sink is owned by the handler chain that created it; line writes go out
//! in a single write call per destination.

pub mod sync;

pub use sync::SyncHandler;

use crate::core::{LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Arc;

pub const STDOUT: &str = "stdout";
pub const STDERR: &str = "stderr";

#[derive(Debug)]
enum Target {
    Stdout,
    Stderr,
    File {
        path: String,
        writer: Mutex<BufWriter<File>>,
    },
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl Target {
    fn name(&self) -> &str {
        match self {
            Target::Stdout => STDOUT,
            Target::Stderr => STDERR,
            Target::File { path, .. } => path,
            Target::Buffer(_) => "buffer",
        }
    }
}

#[derive(Debug)]
pub struct Sink {
    targets: Vec<Target>,
}

impl Sink {
    /// Resolve destination descriptors. Files are opened in append mode and
    /// created when absent; an empty descriptor list means `stderr`.
    pub fn open(paths: &[String]) -> Result<Sink> {
        let mut targets = Vec::new();

        if paths.is_empty() {
            targets.push(Target::Stderr);
        }

        for path in paths {
            let target = match path.as_str() {
                STDOUT => Target::Stdout,
                STDERR => Target::Stderr,
                _ => {
                    let file = OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)
                        .map_err(|e| LoggerError::sink_open(path, e))?;
                    Target::File {
                        path: path.clone(),
                        writer: Mutex::new(BufWriter::new(file)),
                    }
                }
            };
            targets.push(target);
        }

        Ok(Sink { targets })
    }

    /// An in-memory destination, shared through the given buffer. Used by
    /// tests and embedders that capture rendered output directly.
    pub fn buffer(buf: Arc<Mutex<Vec<u8>>>) -> Sink {
        Sink {
            targets: vec![Target::Buffer(buf)],
        }
    }

    /// Write one rendered line to every target, one write call each.
    pub fn write_line(&self, line: &[u8]) -> Result<()> {
        for target in &self.targets {
            match target {
                Target::Stdout => std::io::stdout()
                    .write_all(line)
                    .map_err(|e| LoggerError::sink_write(STDOUT, e))?,
                Target::Stderr => std::io::stderr()
                    .write_all(line)
                    .map_err(|e| LoggerError::sink_write(STDERR, e))?,
                Target::File { path, writer } => writer
                    .lock()
                    .write_all(line)
                    .map_err(|e| LoggerError::sink_write(path, e))?,
                Target::Buffer(buf) => buf.lock().extend_from_slice(line),
            }
        }
        Ok(())
    }

    /// Flush every target, aggregating failures instead of stopping at the
    /// first one.
    pub fn flush(&self) -> Result<()> {
        let mut err = None;

        for target in &self.targets {
            let result = match target {
                Target::Stdout => std::io::stdout().flush(),
                Target::Stderr => std::io::stderr().flush(),
                Target::File { writer, .. } => writer.lock().flush(),
                Target::Buffer(_) => Ok(()),
            };
            if let Err(e) = result {
                err = Some(crate::core::error::append(
                    err,
                    LoggerError::flush(target.name(), e.to_string()),
                ));
            }
        }

        match err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
