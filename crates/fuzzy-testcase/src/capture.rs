//! In-memory capture of formatted log lines

use std::io;
use std::sync::{Arc, RwLock};

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;

/// Collects the output of a `fmt` subscriber so tests can inspect it
///
/// Clones share the same buffer.
#[derive(Debug, Clone)]
pub struct LogCapture {
    buffer: Arc<RwLock<Vec<u8>>>,
    level: LevelFilter,
}

impl Default for LogCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl LogCapture {
    /// Capture events at `INFO` and above
    pub fn new() -> Self {
        Self::with_level(LevelFilter::INFO)
    }

    pub fn with_level(level: impl Into<LevelFilter>) -> Self {
        Self {
            buffer: Arc::new(RwLock::new(Vec::new())),
            level: level.into(),
        }
    }

    /// A dispatch writing into this capture; install it with
    /// `tracing::dispatcher::with_default` or hand it to an
    /// [`ErrorReporter`](crate::ErrorReporter)
    pub fn dispatch(&self) -> Dispatch {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(self.level)
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();
        Dispatch::new(subscriber)
    }

    /// Captured lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        match self.buffer.read() {
            Ok(buffer) => String::from_utf8_lossy(&buffer)
                .lines()
                .map(str::to_string)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.write() {
            buffer.clear();
        }
    }
}

/// Writer handed out to the subscriber for each event
pub struct CaptureWriter {
    buffer: Arc<RwLock<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self
            .buffer
            .write()
            .map_err(|_| io::Error::other("log capture poisoned"))?;
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}
