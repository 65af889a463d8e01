//! Top-level error type.
//!
//! ```text
//! CorvidError
//! ├── Token     - decoding a raw packed token failed
//! ├── Ir        - a rewrite produced an ill-formed tree
//! ├── DuplicateSource / UnknownSource - unit bookkeeping
//! └── Rejected  - a checking pass reported errors
//! ```

use corvid_core::{Diagnostics, TokenError};
use corvid_ir::IrError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorvidError>;

/// Any error surfaced by a [`Unit`](crate::Unit).
#[derive(Debug, Error)]
pub enum CorvidError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Ir(#[from] IrError),

    /// A source with this name was already added to the unit.
    #[error("source `{0}` is already registered")]
    DuplicateSource(String),

    /// No source with this name was added to the unit.
    #[error("no source named `{0}`")]
    UnknownSource(String),

    /// The tree was rejected; every error diagnostic is included.
    #[error("{0}")]
    Rejected(Diagnostics),
}
