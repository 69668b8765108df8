//! Where workflow output goes.
//!
//! Workflows never print directly; they push lines into a [`ReportSink`].
//! The binary uses [`ConsoleSink`], tests use [`MemorySink`] and assert on
//! the collected lines.

use crate::core::messages::ERROR_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
}

pub trait ReportSink {
    fn info(&mut self, text: &str);

    /// Records a recoverable error. `text` is the bare message without the
    /// `ERROR:` prefix.
    fn error(&mut self, text: &str);
}

/// Writes info lines to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn info(&mut self, text: &str) {
        println!("{text}");
    }

    fn error(&mut self, text: &str) {
        tracing::debug!(error = text, "reporting error");
        eprintln!("{ERROR_PREFIX} {text}");
    }
}

/// Collects lines in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<ReportLine>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> Vec<&str> {
        self.texts(LineKind::Info)
    }

    pub fn errors(&self) -> Vec<&str> {
        self.texts(LineKind::Error)
    }

    fn texts(&self, kind: LineKind) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.kind == kind)
            .map(|line| line.text.as_str())
            .collect()
    }
}

impl ReportSink for MemorySink {
    fn info(&mut self, text: &str) {
        self.lines.push(ReportLine {
            kind: LineKind::Info,
            text: text.to_string(),
        });
    }

    fn error(&mut self, text: &str) {
        self.lines.push(ReportLine {
            kind: LineKind::Error,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order_and_kinds() {
        let mut sink = MemorySink::new();
        sink.info("one");
        sink.error("two");
        sink.info("three");

        assert_eq!(sink.lines.len(), 3);
        assert_eq!(sink.infos(), vec!["one", "three"]);
        assert_eq!(sink.errors(), vec!["two"]);
        assert_eq!(sink.lines[1].kind, LineKind::Error);
    }
}
