//! Output sinks
//!
//! A [`Sink`] accepts one fully rendered block of text per log call. The
//! console owns two of them, one per [`Channel`](crate::Channel).

// Standard library
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

// External dependencies
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Destination for rendered log text
pub trait Sink: Send {
    /// Write one rendered block. Line termination is up to the sink.
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// Whether the sink is an interactive terminal; `None` when unknown
    fn is_terminal(&self) -> Option<bool> {
        None
    }

    /// Whether the sink can accept writes at all
    fn is_writable(&self) -> bool {
        true
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        (**self).write_text(text)
    }

    fn is_terminal(&self) -> Option<bool> {
        (**self).is_terminal()
    }

    fn is_writable(&self) -> bool {
        (**self).is_writable()
    }
}

/// Standard stream a configured sink writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkTarget {
    /// Process standard output
    Stdout,
    /// Process standard error
    Stderr,
}

/// Create a sink from configuration
pub fn make_sink(target: SinkTarget) -> Box<dyn Sink> {
    match target {
        SinkTarget::Stdout => Box::new(StdoutSink),
        SinkTarget::Stderr => Box::new(StderrSink),
    }
}

/// Writes each block plus a newline to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{text}")
    }

    fn is_terminal(&self) -> Option<bool> {
        Some(io::stdout().is_terminal())
    }
}

/// Writes each block plus a newline to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stderr().lock();
        writeln!(out, "{text}")
    }

    fn is_terminal(&self) -> Option<bool> {
        Some(io::stderr().is_terminal())
    }
}

/// Adapts any [`Write`] into a sink, newline-terminating and flushing each
/// block
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{text}")?;
        self.writer.flush()
    }
}

/// Keeps every block in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Every block written so far
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Blocks joined with newlines
    pub fn contents(&self) -> String {
        self.entries.lock().join("\n")
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop captured blocks
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.entries.lock().push(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_clones_share_entries() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.write_text("one").unwrap();
        writer.write_text("two\nlines").unwrap();
        assert_eq!(sink.entries(), vec!["one", "two\nlines"]);
        assert_eq!(sink.contents(), "one\ntwo\nlines");
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn writer_sink_terminates_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_text("a\nb").unwrap();
        sink.write_text("c").unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "a\nb\nc\n");
        assert_eq!(WriterSink::new(Vec::new()).is_terminal(), None);
    }

    #[test]
    fn writer_sink_over_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut sink = WriterSink::new(file.reopen().unwrap());
        sink.write_text("persisted").unwrap();
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "persisted\n");
    }

    #[test]
    fn targets_deserialize_lowercase() {
        let target: SinkTarget = serde_json::from_str("\"stderr\"").unwrap();
        assert_eq!(target, SinkTarget::Stderr);
        assert!(serde_json::from_str::<SinkTarget>("\"printer\"").is_err());
    }

    #[test]
    fn standard_streams_report_terminal_state() {
        assert!(make_sink(SinkTarget::Stdout).is_terminal().is_some());
        assert!(make_sink(SinkTarget::Stderr).is_writable());
    }
}
