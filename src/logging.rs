use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Lines kept for the in-app log view.
pub const LOG_BUFFER_CAPACITY: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub timestamp: String,
    pub text: String,
}

/// Bounded, shareable ring of formatted log lines.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<LogLine>>>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(LOG_BUFFER_CAPACITY)
    }
}

impl LogBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, line: LogLine) {
        if let Ok(mut lines) = self.lines.lock() {
            while lines.len() >= self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    pub fn snapshot(&self) -> Vec<LogLine> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

static LOG_BUFFER: Lazy<LogBuffer> = Lazy::new(LogBuffer::default);

/// The process-wide buffer [`init`] feeds.
pub fn log_buffer() -> LogBuffer {
    LOG_BUFFER.clone()
}

/// Formats every event as a single `[LEVEL] target` line into a [`LogBuffer`].
pub struct LogBufferLayer {
    buffer: LogBuffer,
}

impl LogBufferLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S: Subscriber> Layer<S> for LogBufferLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.buffer.push(LogLine {
            level: *meta.level(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            text: format!(
                "[{}] {} — {}{}",
                meta.level(),
                meta.target(),
                visitor.message,
                visitor.fields
            ),
        });
    }
}

/// Install the global subscriber: stdout, an optional plain-text log file
/// and the in-app buffer. Debug mode lowers the level to `debug` and lets
/// `RUST_LOG` override it; otherwise `info` is forced.
///
/// Only the first call installs anything; every call returns the same
/// buffer.
pub fn init(debug: bool, log_file: Option<PathBuf>) -> LogBuffer {
    let buffer = log_buffer();
    let level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let mut file_error = None;
    let file_layer = log_file.and_then(|path| {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
            Err(err) => {
                file_error = Some(format!("{}: {err}", path.display()));
                None
            }
        }
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .with(LogBufferLayer::new(buffer.clone()))
        .try_init()
        .is_ok();

    if let Some(err) = file_error {
        tracing::error!(error = %err, "could not open log file");
    }
    if installed {
        let debug_mode = debug;
        tracing::debug!(debug = debug_mode, "logging initialised");
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> LogLine {
        LogLine {
            level: Level::INFO,
            timestamp: String::new(),
            text: text.into(),
        }
    }

    #[test]
    fn buffer_drops_oldest_when_full() {
        let buffer = LogBuffer::with_capacity(2);
        buffer.push(line("one"));
        buffer.push(line("two"));
        buffer.push(line("three"));
        let texts: Vec<String> = buffer.snapshot().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["two".to_string(), "three".to_string()]);
    }

    #[test]
    fn clear_empties_buffer() {
        let buffer = LogBuffer::default();
        buffer.push(line("one"));
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn layer_formats_level_target_and_message() {
        let buffer = LogBuffer::default();
        let subscriber =
            tracing_subscriber::registry().with(LogBufferLayer::new(buffer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "overlay", id = "a", "key stuck");
        });
        let lines = buffer.snapshot();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, Level::WARN);
        assert_eq!(lines[0].text, "[WARN] overlay — key stuck id=a");
    }
}
