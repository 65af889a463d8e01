//! Corvid: the immutable IR of a scripting-language compiler.
//!
//! The work is split across two crates, re-exported here:
//! - [`corvid_core`]: tokens, positions, sources and diagnostics
//! - [`corvid_ir`]: the node tree, the visitor protocol and passes
//!
//! [`Unit`] ties them together: it owns the sources and the arena a
//! compilation's IR is allocated in.

pub mod error;
pub mod unit;

pub use corvid_core;
pub use corvid_ir;

pub use bumpalo::Bump;
pub use corvid_core::{
    Diagnostic, DiagnosticKind, Diagnostics, Position, Source, Span, Token, TokenType,
};
pub use corvid_ir::{
    Block, CatchNode, IdentNode, IrArena, IrBuilder, IrError, IrOptions, IrResult, Node, NodeKind,
    NodeMeta, TryNode, Visitor,
};
pub use error::{CorvidError, Result};
pub use unit::Unit;
