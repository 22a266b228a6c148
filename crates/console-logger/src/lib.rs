//! Console Logger
//!
//! `tracing` subscriber for browser builds. Formatted events go to the
//! devtools console (`console.error` / `warn` / `info` / `debug` / `log`
//! by level) and into a fixed-size ring buffer of recent lines that the
//! app can read back.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Lines kept in memory when no capacity is given
pub const DEFAULT_CAPACITY: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggerConfig {
    pub max_level: Level,
    pub capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_level: Level::INFO,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Circular buffer of the most recent formatted lines
#[derive(Clone, Debug)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    // Poisoned lock still holds valid lines
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, line: String) {
        if self.capacity == 0 {
            return;
        }
        let mut lines = self.lock();
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Oldest first
    pub fn recent(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    /// Recent lines joined for display, oldest first
    pub fn dump(&self) -> String {
        self.recent().join("\n")
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hands the fmt layer one writer per event
#[derive(Clone, Debug)]
pub struct ConsoleMakeWriter {
    buffer: LogBuffer,
}

impl ConsoleMakeWriter {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO, self.buffer.clone())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level(), self.buffer.clone())
    }
}

/// Collects one formatted event and emits it on drop
pub struct ConsoleWriter {
    level: Level,
    buffer: LogBuffer,
    line: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level, buffer: LogBuffer) -> Self {
        Self { level, buffer, line: Vec::new() }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.line.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.line.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.line).trim_end().to_string();
        emit(self.level, &text);
        self.buffer.push(text);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, text: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(text);
    match level {
        Level::ERROR => console::error_1(&value),
        Level::WARN => console::warn_1(&value),
        Level::INFO => console::info_1(&value),
        Level::DEBUG => console::debug_1(&value),
        Level::TRACE => console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, text: &str) {
    eprintln!("{text}");
}

/// Build the subscriber without installing it
pub fn subscriber(config: &LoggerConfig, buffer: LogBuffer) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_max_level(config.max_level)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleMakeWriter::new(buffer))
        .finish()
}

/// Install the console subscriber as the global default
pub fn init(config: &LoggerConfig) -> Result<LogBuffer, tracing::subscriber::SetGlobalDefaultError> {
    let buffer = LogBuffer::new(config.capacity);
    tracing::subscriber::set_global_default(subscriber(config, buffer.clone()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_buffer_drops_oldest_when_full() {
        let buffer = LogBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {}", i));
        }
        assert_eq!(buffer.recent(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_dump_joins_lines_in_order() {
        let buffer = LogBuffer::new(2);
        assert_eq!(buffer.dump(), "");
        buffer.push(" INFO boot: page mounted".to_string());
        buffer.push(" WARN rank: not saving ranking".to_string());
        buffer.push(" INFO rank: ranking saved".to_string());
        assert_eq!(buffer.dump(), " WARN rank: not saving ranking\n INFO rank: ranking saved");
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let buffer = LogBuffer::new(0);
        buffer.push("ignored".to_string());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_writer_flushes_trimmed_line_on_drop() {
        let buffer = LogBuffer::new(4);
        {
            let mut writer = ConsoleWriter::new(Level::WARN, buffer.clone());
            writer.write_all(b" WARN rank: save failed\n").unwrap();
        }
        assert_eq!(buffer.recent(), vec![" WARN rank: save failed"]);
    }

    #[test]
    fn test_empty_writer_records_nothing() {
        let buffer = LogBuffer::new(4);
        drop(ConsoleWriter::new(Level::INFO, buffer.clone()));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_subscriber_respects_level_and_records_target() {
        let buffer = LogBuffer::new(16);
        let config = LoggerConfig { max_level: Level::INFO, capacity: 16 };
        tracing::subscriber::with_default(subscriber(&config, buffer.clone()), || {
            tracing::debug!(target: "favorite", "hidden");
            tracing::info!(target: "favorite", seiyuu_id = "42", "toggled");
        });

        let lines = buffer.recent();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("favorite"));
        assert!(lines[0].contains("toggled"));
        assert!(lines[0].contains("seiyuu_id="));
        assert!(lines[0].contains("42"));
    }
}
