//! # Reports
//!
//! Both checkers produce a [`Report`]: ordered, human-readable lines plus the
//! number of violations or findings behind them. A report with a zero count
//! signals success, independent of how many lines it holds.

use std::fmt;

/// Status glyph prefixed to a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// A document passed schema validation.
    Valid,
    /// The relation check found nothing.
    Consistent,
    /// A document failed, or a findings section follows.
    Failed,
    /// Nothing to check.
    Warning,
}

impl Mark {
    /// The prefix written before the line text.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Valid => "✔️  ",
            Self::Consistent => "✅ ",
            Self::Failed => "❌ ",
            Self::Warning => "⚠️  ",
        }
    }
}

/// Ordered report lines and the violation count they describe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
    error_count: usize,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line prefixed with a status glyph.
    pub fn push_marked(&mut self, mark: Mark, text: impl fmt::Display) {
        self.lines.push(format!("{}{text}", mark.prefix()));
    }

    /// Append an unprefixed line, typically an indented detail.
    pub fn push_line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Count `n` more violations against this report.
    pub fn add_errors(&mut self, n: usize) {
        self.error_count += n;
    }

    /// Append every line of `other` and add its count to ours.
    pub fn merge(&mut self, other: Report) {
        self.lines.extend(other.lines);
        self.error_count += other.error_count;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// True when no violations were counted.
    pub fn is_success(&self) -> bool {
        self.error_count == 0
    }

    /// Process exit status: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
