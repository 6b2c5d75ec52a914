//! Human-readable trace of a single analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered trace lines produced by one [`analyze`](crate::EquivalenceEngine::analyze) call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisLog {
    lines: Vec<String>,
}

impl AnalysisLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Start a new section: a blank separator line, then the header.
    /// The first section gets no separator.
    pub fn section(&mut self, header: &str) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(format!("=== {header} ==="));
    }

    /// The recorded lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with newlines.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for AnalysisLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
