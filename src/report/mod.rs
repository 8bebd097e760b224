//! Diagnostic reporting
//!
//! Progress lines, warnings, and errors all go through a `Reporter` so the
//! primary output stream stays reserved for the rendered module. The default
//! reporter writes to stderr; tests capture into an in-memory buffer.

use std::io::{self, Write};

/// Sink for human-readable diagnostics
pub struct Reporter<W: Write> {
    out: W,
    warnings: usize,
    errors: usize,
}

impl Reporter<io::Stderr> {
    /// Reporter writing to the process stderr stream
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter {
            out,
            warnings: 0,
            errors: 0,
        }
    }

    /// Progress line, e.g. one per accepted project
    pub fn info(&mut self, message: &str) {
        let _ = writeln!(self.out, "{}", message);
    }

    /// Recoverable problem; processing continues
    pub fn warning(&mut self, message: &str) {
        self.warnings += 1;
        let _ = writeln!(self.out, "Warning: {}", message);
    }

    /// Non-recoverable for the item being processed, still not fatal for the run
    pub fn error(&mut self, message: &str) {
        self.errors += 1;
        let _ = writeln!(self.out, "Error: {}", message);
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_prefixes() {
        let mut buf = Vec::new();
        let mut reporter = Reporter::new(&mut buf);
        reporter.info("scanning");
        reporter.warning("something odd");
        reporter.error("something broke");

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "scanning\nWarning: something odd\nError: something broke\n");
    }

    #[test]
    fn test_counts() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.warning("a");
        reporter.warning("b");
        reporter.error("c");

        assert_eq!(reporter.warning_count(), 2);
        assert_eq!(reporter.error_count(), 1);
    }
}
