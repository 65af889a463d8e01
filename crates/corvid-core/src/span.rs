//! Line/column locations reported in diagnostics.

use std::fmt;

/// The line, column, and extent of a node as a diagnostic reports it.
///
/// Nodes carry only a [`Position`](crate::Position); a `Span` is derived
/// from it by [`Source::span_of`](crate::Source::span_of) when a pass has
/// something to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// 1-indexed line.
    pub line: u32,
    /// 1-indexed byte column.
    pub col: u32,
    /// Extent in bytes, from the node's start to its finish.
    pub len: u32,
}

impl Span {
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }
}

/// `line:col`, the prefix form used by [`Diagnostic`](crate::Diagnostic).
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
