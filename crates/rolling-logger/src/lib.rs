//! Rolling Logger
//!
//! Keeps the most recent log lines in a circular buffer and forwards each
//! line to a sink (the browser console in the frontend).
//!
//! Installed as the global `tracing` subscriber; `log` records are bridged
//! into it, so both `tracing::info!` and `log::info!` end up in the buffer.
//! Logging goes through those macros; this crate only owns the plumbing.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Receives every formatted line
pub type Sink = fn(Level, &str);

pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Error)]
pub enum LoggerError {
    /// Another global subscriber or `log` logger is already installed
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Fixed-size buffer of formatted log lines; the oldest line is dropped first
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        let mut lines = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Oldest first
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// `MakeWriter` handing out one [`LineWriter`] per event
#[derive(Clone)]
pub struct RollingMakeWriter {
    app_name: Arc<str>,
    buffer: RollingBuffer,
    sink: Option<Sink>,
}

impl RollingMakeWriter {
    pub fn new(app_name: &str, buffer: RollingBuffer, sink: Option<Sink>) -> Self {
        Self {
            app_name: Arc::from(app_name),
            buffer,
            sink,
        }
    }
}

impl<'a> MakeWriter<'a> for RollingMakeWriter {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter::new(self.clone(), Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        LineWriter::new(self.clone(), *meta.level())
    }
}

/// Collects one formatted event and emits it when dropped
pub struct LineWriter {
    target: RollingMakeWriter,
    level: Level,
    bytes: Vec<u8>,
}

impl LineWriter {
    fn new(target: RollingMakeWriter, level: Level) -> Self {
        Self {
            target,
            level,
            bytes: Vec::new(),
        }
    }
}

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.bytes);
        let text = text.trim_end();
        if text.is_empty() {
            return;
        }
        let line = format!(
            "[{}] [{}] {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            self.target.app_name,
            text
        );
        if let Some(sink) = self.target.sink {
            sink(self.level, &line);
        }
        self.target.buffer.push(line);
    }
}

/// Install the global subscriber and return the shared buffer
pub fn init_logger(
    app_name: &str,
    level: LevelFilter,
    capacity: usize,
    sink: Option<Sink>,
) -> Result<RollingBuffer, LoggerError> {
    let buffer = RollingBuffer::new(capacity);
    let writer = RollingMakeWriter::new(app_name, buffer.clone(), sink);

    tracing_subscriber::registry()
        .with(level)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .without_time()
                .with_target(true),
        )
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static SINK_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counting_sink(_level: Level, _line: &str) {
        SINK_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn scoped_subscriber(writer: RollingMakeWriter) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::registry().with(LevelFilter::DEBUG).with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .without_time(),
        )
    }

    #[test]
    fn test_buffer_drops_oldest() {
        let buffer = RollingBuffer::new(2);
        buffer.push("a".to_string());
        buffer.push("b".to_string());
        buffer.push("c".to_string());
        assert_eq!(buffer.lines(), vec!["b".to_string(), "c".to_string()]);
        assert_eq!(buffer.capacity(), 2);
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let buffer = RollingBuffer::new(0);
        buffer.push("a".to_string());
        buffer.push("b".to_string());
        assert_eq!(buffer.lines(), vec!["b".to_string()]);
    }

    #[test]
    fn test_events_reach_buffer_and_sink() {
        let buffer = RollingBuffer::new(10);
        let writer = RollingMakeWriter::new("TodoPlatform", buffer.clone(), Some(counting_sink));
        let before = SINK_CALLS.load(Ordering::SeqCst);

        tracing::subscriber::with_default(scoped_subscriber(writer), || {
            tracing::info!(count = 3, "todos loaded");
            tracing::trace!("filtered out");
        });

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[TodoPlatform]"));
        assert!(lines[0].contains("todos loaded"));
        assert!(lines[0].contains("count=3"));
        assert_eq!(SINK_CALLS.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_global_init_captures_tracing_and_log() {
        let buffer = init_logger("TodoPlatform", LevelFilter::INFO, 8, None).unwrap();

        // Run on a fresh thread so no scoped subscriber from another test applies
        std::thread::spawn(|| {
            tracing::warn!(status = 500, "request rejected by server");
            log::error!("bridged record");
            tracing::debug!("below the level filter");
        })
        .join()
        .unwrap();

        let lines = buffer.lines();
        assert!(lines.iter().any(|l| l.contains("request rejected by server")));
        assert!(lines.iter().any(|l| l.contains("bridged record")));
        assert!(!lines.iter().any(|l| l.contains("below the level filter")));

        let again = init_logger("TodoPlatform", LevelFilter::INFO, 8, None);
        assert!(matches!(again, Err(LoggerError::Init(_))));
    }
}
