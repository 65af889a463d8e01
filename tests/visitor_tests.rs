//! Integration tests for the visitor protocol over whole trees.


use corvid::corvid_ir::{IrError, TryNode, traverse};
use corvid::{Block, Bump, IrArena, IrBuilder, Node, NodeKind, Source, Visitor};
use test_harness::{Recorder, ReplaceCatchBody, SubstituteIdent};

/// Builds `depth` nested blocks. Each level holds an expression statement
/// sibling followed by the next level; the innermost holds `leaf`.
fn nested<'ir>(b: &IrBuilder<'ir>, depth: usize, leaf: &str) -> &'ir Block<'ir> {
    let stmt = |name: &str| Node::ExpressionStatement(b.expr_stmt(Node::Ident(b.ident(name))));
    let mut current = b.block(&[stmt(leaf)]);
    for level in 0..depth {
        let sibling = stmt(&format!("s{level}"));
        current = b.block(&[sibling, Node::Block(current)]);
    }
    current
}

#[test]
fn test_single_leaf_rewrite_shares_siblings() {
    let bump = Bump::new();
    let source = Source::new("deep.js", "");
    let arena = IrArena::new(&bump);
    let b = IrBuilder::new(arena, &source);

    let root = nested(&b, 32, "target");
    let mut visitor = SubstituteIdent {
        target: "target",
        replacement: Node::Literal(b.number(0.0)),
    };
    let result = traverse(Node::Block(root), arena, &mut visitor).unwrap();

    let mut old = root;
    let mut new = result.as_block().unwrap();
    for _ in 0..32 {
        assert!(!std::ptr::eq(old, new), "every ancestor is rebuilt");
        assert_eq!(old.meta(), new.meta());
        assert!(old.statements()[0].same(new.statements()[0]), "siblings are shared");
        old = old.statements()[1].as_block().unwrap();
        new = new.statements()[1].as_block().unwrap();
    }
    assert_eq!(Node::Block(new).to_string(), "{ 0; }");
    assert_eq!(Node::Block(old).to_string(), "{ target; }");
}

#[test]
fn test_unmatched_rewrite_allocates_nothing() {
    let bump = Bump::new();
    let source = Source::new("deep.js", "");
    let arena = IrArena::new(&bump);
    let b = IrBuilder::new(arena, &source);

    let root = Node::Block(nested(&b, 64, "other"));
    let mut visitor = SubstituteIdent {
        target: "target",
        replacement: Node::Literal(b.number(0.0)),
    };

    let before = bump.allocated_bytes();
    let result = traverse(root, arena, &mut visitor).unwrap();
    assert!(result.same(root));
    assert_eq!(bump.allocated_bytes(), before);
}

#[test]
fn test_declining_try_skips_clauses() {
    struct SkipTry {
        catches_seen: usize,
    }

    impl<'ir> Visitor<'ir> for SkipTry {
        fn enter_try(&mut self, _node: &'ir TryNode<'ir>) -> bool {
            false
        }

        fn enter_catch(&mut self, _node: &'ir corvid::CatchNode<'ir>) -> bool {
            self.catches_seen += 1;
            true
        }
    }

    let bump = Bump::new();
    let source = Source::new("skip.js", "");
    let arena = IrArena::new(&bump);
    let b = IrBuilder::new(arena, &source);

    let root = Node::Try(b.try_(
        b.block(&[]),
        &[b.catch(b.ident("e"), None, b.block(&[]))],
        None,
    ));
    let mut visitor = SkipTry { catches_seen: 0 };
    let result = root.accept(arena, &mut visitor).unwrap();

    assert_eq!(visitor.catches_seen, 0);
    assert!(result.same(root));
}

#[test]
fn test_try_traversal_order() {
    let bump = Bump::new();
    let source = Source::new("order.js", "");
    let arena = IrArena::new(&bump);
    let b = IrBuilder::new(arena, &source);

    let root = Node::Try(b.try_(
        b.block(&[]),
        &[
            b.catch(b.ident("a"), Some(Node::Ident(b.ident("p"))), b.block(&[])),
            b.catch(b.ident("b"), None, b.block(&[])),
        ],
        Some(b.block(&[])),
    ));

    let mut recorder = Recorder::default();
    root.accept(arena, &mut recorder).unwrap();

    assert_eq!(
        recorder.kinds(),
        [
            NodeKind::Try,
            NodeKind::Block,
            NodeKind::Catch,
            NodeKind::Ident,
            NodeKind::Ident,
            NodeKind::Block,
            NodeKind::Catch,
            NodeKind::Ident,
            NodeKind::Block,
            NodeKind::Block,
        ]
    );
}

#[test]
fn test_catch_rewrite_inside_try() {
    let bump = Bump::new();
    let source = Source::new("try.js", "");
    let arena = IrArena::new(&bump);
    let b = IrBuilder::new(arena, &source);

    let body = b.block(&[Node::Throw(b.throw(Node::Ident(b.ident("x"))))]);
    let finally = b.block(&[]);
    let try_node = b.try_(body, &[b.catch(b.ident("e"), None, b.block(&[]))], Some(finally));
    let replacement = b.block(&[Node::Return(b.ret(None))]);

    let mut visitor = ReplaceCatchBody {
        arena,
        replacement,
        replaced: 0,
    };
    let result = Node::Try(try_node).accept(arena, &mut visitor).unwrap();

    let Node::Try(rewritten) = result else {
        panic!("expected try, got {}", result.kind());
    };
    assert!(!std::ptr::eq(rewritten, try_node));
    assert!(std::ptr::eq(rewritten.body(), body));
    assert!(std::ptr::eq(rewritten.finally().unwrap(), finally));
    assert!(std::ptr::eq(rewritten.catches()[0].body(), replacement));
    assert!(rewritten.is_terminal());
    assert!(!try_node.is_terminal());
    assert_eq!(
        result.to_string(),
        "try { throw x; } catch (e) { return; } finally {}"
    );
}

#[test]
fn test_catch_slot_rejects_other_kinds() {
    struct Flatten;

    impl<'ir> Visitor<'ir> for Flatten {
        fn leave_catch(&mut self, node: &'ir corvid::CatchNode<'ir>) -> Node<'ir> {
            Node::Block(node.body())
        }
    }

    let bump = Bump::new();
    let source = Source::new("try.js", "");
    let arena = IrArena::new(&bump);
    let b = IrBuilder::new(arena, &source);

    let root = Node::Try(b.try_(
        b.block(&[]),
        &[b.catch(b.ident("e"), None, b.block(&[]))],
        None,
    ));
    let err = root.accept(arena, &mut Flatten).unwrap_err();
    assert!(matches!(
        err,
        IrError::SlotKindMismatch {
            parent: NodeKind::Try,
            expected: NodeKind::Catch,
            found: NodeKind::Block,
            ..
        }
    ));
}
