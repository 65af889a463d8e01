//! Corvid core types.
//!
//! This crate holds the metadata every IR node carries and the types shared
//! by every later stage of the compiler:
//! - [`Token`] and [`TokenType`]: packed position/length/type tokens
//! - [`Position`]: a token plus a finish offset
//! - [`Source`]: the read-only text a compilation unit was parsed from
//! - [`Span`]: line/column locations for diagnostics
//! - [`Diagnostic`] and [`Diagnostics`]: findings reported by passes

pub mod error;
pub mod position;
pub mod source;
pub mod span;
pub mod token;

pub use error::{Diagnostic, DiagnosticKind, Diagnostics, TokenError};
pub use position::Position;
pub use source::Source;
pub use span::Span;
pub use token::{Token, TokenType};
