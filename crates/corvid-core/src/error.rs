//! Core error and diagnostic types.
//!
//! ## Overview
//!
//! ```text
//! TokenError   - decoding a raw packed token failed
//! Diagnostic   - a single finding reported by a compiler pass
//! Diagnostics  - an ordered collection of findings
//! ```
//!
//! Errors in this crate describe malformed inputs. Findings about a
//! well-formed tree (for example, use of a disabled language extension)
//! are reported as [`Diagnostic`]s so a pass can report all of them at
//! once instead of stopping at the first.

use std::fmt;

use thiserror::Error;

use crate::Span;

// ============================================================================
// Token Errors
// ============================================================================

/// Errors from decoding a raw [`Token`](crate::Token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The low byte of the raw token is not a known token type.
    #[error("unknown token type tag {tag:#04x} in raw token {raw:#x}")]
    UnknownType { raw: u64, tag: u8 },
}

// ============================================================================
// Diagnostics
// ============================================================================

/// The severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The tree is invalid under the active options.
    Error,
    /// Valid, but probably not what the author meant.
    Warning,
    /// Informational note.
    Info,
}

impl DiagnosticKind {
    /// Returns a human-readable name for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Info => "info",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding from a compiler pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub kind: DiagnosticKind,
    /// Name of the source the finding refers to.
    pub section: String,
    /// Location within that source.
    pub span: Span,
    /// Message text.
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(section: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            section: section.into(),
            span,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(section: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Warning,
            section: section.into(),
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.section, self.span, self.kind, self.message
        )
    }
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Check if there are any diagnostics.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Iterate over the error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Error)
    }

    /// Iterate over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error("main.js", Span::new(3, 9, 5), "guarded catch is disabled");
        assert_eq!(
            d.to_string(),
            "main.js:3:9: error: guarded catch is disabled"
        );
    }

    #[test]
    fn collection_tracks_errors() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());
        assert!(!diags.has_errors());

        diags.push(Diagnostic::warning("a.js", Span::new(1, 1, 0), "w"));
        assert!(!diags.has_errors());

        diags.push(Diagnostic::error("a.js", Span::new(2, 1, 0), "e"));
        assert!(diags.has_errors());
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.errors().count(), 1);
        assert_eq!(diags.to_string(), "a.js:1:1: warning: w\na.js:2:1: error: e");
    }

    #[test]
    fn token_error_message() {
        let err = TokenError::UnknownType { raw: 0xFE, tag: 0xFE };
        assert_eq!(
            err.to_string(),
            "unknown token type tag 0xfe in raw token 0xfe"
        );
    }
}
