//! Errors raised while traversing or rewriting the IR.

use thiserror::Error;

use crate::node::NodeKind;

/// Result alias for IR operations.
pub type IrResult<T> = Result<T, IrError>;

/// Errors from IR traversal.
///
/// Trees are well-formed by construction: required children cannot be
/// absent. The remaining failure is a visitor hook substituting a node of
/// the wrong kind into a slot that only admits one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IrError {
    /// A rewrite put a node of the wrong kind into a typed child slot.
    #[error("{parent} `{slot}` must be {expected}, found {found}")]
    SlotKindMismatch {
        parent: NodeKind,
        slot: &'static str,
        expected: NodeKind,
        found: NodeKind,
    },
}
