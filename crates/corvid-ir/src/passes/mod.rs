//! Passes over the IR.
//!
//! - [`check`]: report uses of language extensions the options disable
//! - [`fold`]: fold operators over literal operands
//! - [`resolve`]: resolve identifiers against enclosing catch bindings
//!
//! [`run_pipeline`] runs the check and then, if enabled, the folder.

pub mod check;
pub mod fold;
pub mod resolve;

pub use check::ConditionalCatchCheck;
pub use fold::ConstantFolder;
pub use resolve::{CatchScopeResolver, ScopeOutput};

use corvid_core::Diagnostics;

use crate::arena::IrArena;
use crate::error::IrResult;
use crate::node::Node;
use crate::options::IrOptions;

/// Output of [`run_pipeline`].
#[derive(Debug)]
pub struct PipelineOutput<'ir> {
    /// The root after all rewriting passes.
    pub root: Node<'ir>,
    /// Findings from the checking passes.
    pub diagnostics: Diagnostics,
    /// Number of nodes the folder replaced.
    pub folded: usize,
}

/// Check `root` against `options`, then fold constants if enabled.
///
/// Folding is skipped when the check reported errors; the input root is
/// returned unchanged in that case.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn run_pipeline<'ir>(
    arena: IrArena<'ir>,
    root: Node<'ir>,
    options: IrOptions,
) -> IrResult<PipelineOutput<'ir>> {
    let diagnostics = ConditionalCatchCheck::new(options).run(arena, root)?;

    if diagnostics.has_errors() || !options.fold_constants {
        return Ok(PipelineOutput {
            root,
            diagnostics,
            folded: 0,
        });
    }

    let (root, folded) = ConstantFolder::new(arena).run(root)?;
    Ok(PipelineOutput {
        root,
        diagnostics,
        folded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IrBuilder;
    use crate::ops::BinaryOp;
    use bumpalo::Bump;
    use corvid_core::Source;

    #[test]
    fn folds_when_clean() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let sum = b.binary(
            BinaryOp::Add,
            Node::Literal(b.number(1.0)),
            Node::Literal(b.number(2.0)),
        );
        let root = Node::Block(b.block(&[Node::Return(b.ret(Some(Node::Binary(sum))))]));

        let output = run_pipeline(arena, root, IrOptions::strict()).unwrap();
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.folded, 1);
        assert_eq!(output.root.to_string(), "{ return 3; }");
    }

    #[test]
    fn skips_folding_on_errors() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let guard = Node::Binary(b.binary(
            BinaryOp::Add,
            Node::Literal(b.number(1.0)),
            Node::Literal(b.number(2.0)),
        ));
        let root = Node::Try(b.try_(
            b.block(&[]),
            &[b.catch(b.ident("e"), Some(guard), b.block(&[]))],
            None,
        ));

        let output = run_pipeline(arena, root, IrOptions::strict()).unwrap();
        assert!(output.diagnostics.has_errors());
        assert!(output.root.same(root));
        assert_eq!(output.folded, 0);
    }

    #[test]
    fn respects_fold_option() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let root = Node::Binary(b.binary(
            BinaryOp::Mul,
            Node::Literal(b.number(2.0)),
            Node::Literal(b.number(4.0)),
        ));
        let options = IrOptions::strict().with_fold_constants(false);

        let output = run_pipeline(arena, root, options).unwrap();
        assert!(output.root.same(root));
    }
}
