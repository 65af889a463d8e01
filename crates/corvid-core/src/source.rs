//! Source text shared by every node of a compilation unit.

use std::fmt;

use crate::position::Position;
use crate::span::Span;

/// The text a compilation unit was parsed from.
///
/// A `Source` is created once per unit and borrowed by every node parsed
/// from it. It is never mutated after construction, so nodes referring to
/// it may be read from any thread.
pub struct Source {
    name: String,
    content: String,
    /// Byte offset of the first character of each line.
    line_starts: Vec<u32>,
}

impl Source {
    /// Create a source from a name (usually a file path) and its text.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );

        Self {
            name: name.into(),
            content,
            line_starts,
        }
    }

    /// The name this source was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full source text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-indexed line containing `offset`.
    pub fn line_of(&self, offset: u32) -> u32 {
        self.line_starts.partition_point(|&start| start <= offset) as u32
    }

    /// 1-indexed byte column of `offset` within its line.
    pub fn column_of(&self, offset: u32) -> u32 {
        let line = self.line_of(offset);
        offset - self.line_starts[line as usize - 1] + 1
    }

    /// Line/column span for a position, for diagnostics.
    pub fn span_of(&self, position: Position) -> Span {
        Span::new(
            self.line_of(position.start()),
            self.column_of(position.start()),
            position.len(),
        )
    }

    /// The text a position covers, if it lies within this source.
    pub fn text(&self, position: Position) -> Option<&str> {
        self.content
            .get(position.start() as usize..position.finish() as usize)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("name", &self.name)
            .field("len", &self.content.len())
            .finish()
    }
}
