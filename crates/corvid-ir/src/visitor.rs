//! Visitor protocol for traversing and rewriting the IR.
//!
//! A pass implements [`Visitor`] and hands it to [`Node::accept`] (or
//! [`traverse`]). Every node kind has a pair of hooks:
//!
//! - `enter_*` runs before the node's children are visited. Returning
//!   `false` skips the children *and* the leave hook; the node itself is
//!   returned unchanged to the caller of `accept`.
//! - `leave_*` runs after the children have been visited and receives the
//!   node rebuilt around the (possibly rewritten) children. Whatever it
//!   returns replaces the node in its parent.
//!
//! Every per-kind hook defaults to [`Visitor::enter_default`] and
//! [`Visitor::leave_default`], which descend everywhere and replace nothing.
//! A visitor that overrides nothing is therefore an identity traversal that
//! allocates nothing.
//!
//! # Example: Recording visitation order
//!
//! ```
//! use bumpalo::Bump;
//! use corvid_core::Source;
//! use corvid_ir::{IrArena, IrBuilder, Node, NodeKind, Visitor};
//!
//! struct Order(Vec<NodeKind>);
//!
//! impl<'ir> Visitor<'ir> for Order {
//!     fn enter_default(&mut self, node: Node<'ir>) -> bool {
//!         self.0.push(node.kind());
//!         true
//!     }
//! }
//!
//! let bump = Bump::new();
//! let source = Source::new("demo.js", "");
//! let arena = IrArena::new(&bump);
//! let b = IrBuilder::new(arena, &source);
//! let clause = b.catch(b.ident("e"), None, b.block(&[]));
//!
//! let mut order = Order(Vec::new());
//! let result = Node::Catch(clause).accept(arena, &mut order).unwrap();
//!
//! assert!(result.same(Node::Catch(clause)));
//! assert_eq!(order.0, [NodeKind::Catch, NodeKind::Ident, NodeKind::Block]);
//! ```

use crate::arena::IrArena;
use crate::catch::CatchNode;
use crate::error::IrResult;
use crate::expr::{BinaryNode, IdentNode, LiteralNode, UnaryNode};
use crate::node::Node;
use crate::stmt::{Block, ExpressionStatement, IfNode, ReturnNode, ThrowNode, TryNode, VarNode};

/// Per-kind enter/leave hooks used by [`Node::accept`].
pub trait Visitor<'ir> {
    // === Defaults ===

    /// Fallback pre-order hook for every kind not overridden.
    fn enter_default(&mut self, node: Node<'ir>) -> bool {
        let _ = node;
        true
    }

    /// Fallback post-order hook for every kind not overridden.
    fn leave_default(&mut self, node: Node<'ir>) -> Node<'ir> {
        node
    }

    // === Expressions ===

    fn enter_ident(&mut self, node: &'ir IdentNode<'ir>) -> bool {
        self.enter_default(Node::Ident(node))
    }

    fn leave_ident(&mut self, node: &'ir IdentNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::Ident(node))
    }

    fn enter_literal(&mut self, node: &'ir LiteralNode<'ir>) -> bool {
        self.enter_default(Node::Literal(node))
    }

    fn leave_literal(&mut self, node: &'ir LiteralNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::Literal(node))
    }

    fn enter_unary(&mut self, node: &'ir UnaryNode<'ir>) -> bool {
        self.enter_default(Node::Unary(node))
    }

    fn leave_unary(&mut self, node: &'ir UnaryNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::Unary(node))
    }

    fn enter_binary(&mut self, node: &'ir BinaryNode<'ir>) -> bool {
        self.enter_default(Node::Binary(node))
    }

    fn leave_binary(&mut self, node: &'ir BinaryNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::Binary(node))
    }

    // === Statements ===

    fn enter_block(&mut self, node: &'ir Block<'ir>) -> bool {
        self.enter_default(Node::Block(node))
    }

    fn leave_block(&mut self, node: &'ir Block<'ir>) -> Node<'ir> {
        self.leave_default(Node::Block(node))
    }

    fn enter_expression_statement(&mut self, node: &'ir ExpressionStatement<'ir>) -> bool {
        self.enter_default(Node::ExpressionStatement(node))
    }

    fn leave_expression_statement(&mut self, node: &'ir ExpressionStatement<'ir>) -> Node<'ir> {
        self.leave_default(Node::ExpressionStatement(node))
    }

    fn enter_var(&mut self, node: &'ir VarNode<'ir>) -> bool {
        self.enter_default(Node::Var(node))
    }

    fn leave_var(&mut self, node: &'ir VarNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::Var(node))
    }

    fn enter_return(&mut self, node: &'ir ReturnNode<'ir>) -> bool {
        self.enter_default(Node::Return(node))
    }

    fn leave_return(&mut self, node: &'ir ReturnNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::Return(node))
    }

    fn enter_throw(&mut self, node: &'ir ThrowNode<'ir>) -> bool {
        self.enter_default(Node::Throw(node))
    }

    fn leave_throw(&mut self, node: &'ir ThrowNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::Throw(node))
    }

    fn enter_if(&mut self, node: &'ir IfNode<'ir>) -> bool {
        self.enter_default(Node::If(node))
    }

    fn leave_if(&mut self, node: &'ir IfNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::If(node))
    }

    // === Exception handling ===

    fn enter_try(&mut self, node: &'ir TryNode<'ir>) -> bool {
        self.enter_default(Node::Try(node))
    }

    fn leave_try(&mut self, node: &'ir TryNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::Try(node))
    }

    /// Pre-order hook for a catch clause. The exception identifier is
    /// visited first, then the guard if present, then the body.
    fn enter_catch(&mut self, node: &'ir CatchNode<'ir>) -> bool {
        self.enter_default(Node::Catch(node))
    }

    fn leave_catch(&mut self, node: &'ir CatchNode<'ir>) -> Node<'ir> {
        self.leave_default(Node::Catch(node))
    }
}

/// Run `visitor` over the tree rooted at `root` and return the new root.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn traverse<'ir, V>(
    root: Node<'ir>,
    arena: IrArena<'ir>,
    visitor: &mut V,
) -> IrResult<Node<'ir>>
where
    V: Visitor<'ir> + ?Sized,
{
    root.accept(arena, visitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IrBuilder;
    use crate::node::NodeKind;
    use bumpalo::Bump;
    use corvid_core::Source;

    /// Records every node in pre-order and every leave in post-order.
    #[derive(Default)]
    struct Recorder {
        entered: Vec<NodeKind>,
        left: Vec<NodeKind>,
    }

    impl<'ir> Visitor<'ir> for Recorder {
        fn enter_default(&mut self, node: Node<'ir>) -> bool {
            self.entered.push(node.kind());
            true
        }

        fn leave_default(&mut self, node: Node<'ir>) -> Node<'ir> {
            self.left.push(node.kind());
            node
        }
    }

    /// Declines to descend into any block.
    struct SkipBlocks(usize);

    impl<'ir> Visitor<'ir> for SkipBlocks {
        fn enter_block(&mut self, _node: &'ir Block<'ir>) -> bool {
            self.0 += 1;
            false
        }

        fn enter_ident(&mut self, _node: &'ir IdentNode<'ir>) -> bool {
            panic!("identifiers inside skipped blocks must not be visited");
        }
    }

    #[test]
    fn identity_traversal_allocates_nothing() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let root = Node::Try(b.try_(
            b.block(&[Node::Throw(b.throw(Node::Ident(b.ident("x"))))]),
            &[b.catch(b.ident("e"), None, b.block(&[]))],
            None,
        ));

        let before = bump.allocated_bytes();
        let result = traverse(root, arena, &mut Recorder::default()).unwrap();
        assert!(result.same(root));
        assert_eq!(bump.allocated_bytes(), before);
    }

    #[test]
    fn pre_and_post_order() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let root = Node::If(b.if_(
            Node::Ident(b.ident("ok")),
            b.block(&[Node::Return(b.ret(None))]),
            None,
        ));

        let mut recorder = Recorder::default();
        root.accept(arena, &mut recorder).unwrap();

        assert_eq!(
            recorder.entered,
            [NodeKind::If, NodeKind::Ident, NodeKind::Block, NodeKind::Return]
        );
        assert_eq!(
            recorder.left,
            [NodeKind::Ident, NodeKind::Return, NodeKind::Block, NodeKind::If]
        );
    }

    #[test]
    fn declining_enter_skips_children_and_leave() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let arena = IrArena::new(&bump);
        let b = IrBuilder::new(arena, &source);

        let block = b.block(&[Node::ExpressionStatement(b.expr_stmt(Node::Ident(b.ident("x"))))]);
        let mut skip = SkipBlocks(0);
        let result = Node::Block(block).accept(arena, &mut skip).unwrap();

        assert_eq!(skip.0, 1);
        assert!(result.same(Node::Block(block)));
    }
}
