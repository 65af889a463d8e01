//! The closed node type shared by every IR variant.
//!
//! [`Node`] is a sum type over all node kinds. Each variant holds an arena
//! reference to its concrete node struct, which makes `Node` a small `Copy`
//! value and gives every node a stable identity: two `Node`s are the *same*
//! node exactly when they point at the same allocation (see [`Node::same`]).
//!
//! Nodes are immutable. Every concrete variant provides `with_*` methods that
//! look like setters but never mutate: they return the receiver when the new
//! child is identical to the current one, and otherwise allocate one new node
//! that shares every other child and copies the receiver's [`NodeMeta`].

use std::fmt;

use corvid_core::{Position, Source, Span, Token};

use crate::arena::IrArena;
use crate::catch::CatchNode;
use crate::error::{IrError, IrResult};
use crate::expr::{BinaryNode, IdentNode, LiteralNode, UnaryNode};
use crate::stmt::{Block, ExpressionStatement, IfNode, ReturnNode, ThrowNode, TryNode, VarNode};
use crate::visitor::Visitor;

/// Metadata carried by every node: the source it was parsed from and its
/// position within it.
///
/// Rewrites copy the metadata of the node they replace; it is never
/// recomputed.
#[derive(Clone, Copy)]
pub struct NodeMeta<'ir> {
    source: &'ir Source,
    position: Position,
}

impl<'ir> NodeMeta<'ir> {
    /// Metadata for a node starting at `token` and ending at `finish`.
    #[inline]
    pub fn new(source: &'ir Source, token: Token, finish: u32) -> Self {
        Self {
            source,
            position: Position::new(token, finish),
        }
    }

    /// Metadata from an existing position.
    #[inline]
    pub fn at(source: &'ir Source, position: Position) -> Self {
        Self { source, position }
    }

    /// The source this node was parsed from.
    #[inline]
    pub fn source(&self) -> &'ir Source {
        self.source
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn token(&self) -> Token {
        self.position.token()
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.position.start()
    }

    #[inline]
    pub fn finish(&self) -> u32 {
        self.position.finish()
    }

    /// Line/column location, for diagnostics.
    pub fn span(&self) -> Span {
        self.source.span_of(self.position)
    }
}

impl PartialEq for NodeMeta<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.source, other.source) && self.position == other.position
    }
}

impl Eq for NodeMeta<'_> {}

impl fmt::Debug for NodeMeta<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.source.name(), self.position)
    }
}

/// The kind of a node, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Ident,
    Literal,
    Unary,
    Binary,
    Block,
    ExpressionStatement,
    Var,
    Return,
    Throw,
    If,
    Try,
    Catch,
}

impl NodeKind {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Ident => "identifier",
            NodeKind::Literal => "literal",
            NodeKind::Unary => "unary expression",
            NodeKind::Binary => "binary expression",
            NodeKind::Block => "block",
            NodeKind::ExpressionStatement => "expression statement",
            NodeKind::Var => "var declaration",
            NodeKind::Return => "return statement",
            NodeKind::Throw => "throw statement",
            NodeKind::If => "if statement",
            NodeKind::Try => "try statement",
            NodeKind::Catch => "catch clause",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An IR node.
#[derive(Debug, Clone, Copy)]
pub enum Node<'ir> {
    Ident(&'ir IdentNode<'ir>),
    Literal(&'ir LiteralNode<'ir>),
    Unary(&'ir UnaryNode<'ir>),
    Binary(&'ir BinaryNode<'ir>),
    Block(&'ir Block<'ir>),
    ExpressionStatement(&'ir ExpressionStatement<'ir>),
    Var(&'ir VarNode<'ir>),
    Return(&'ir ReturnNode<'ir>),
    Throw(&'ir ThrowNode<'ir>),
    If(&'ir IfNode<'ir>),
    Try(&'ir TryNode<'ir>),
    Catch(&'ir CatchNode<'ir>),
}

impl<'ir> Node<'ir> {
    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Ident(_) => NodeKind::Ident,
            Node::Literal(_) => NodeKind::Literal,
            Node::Unary(_) => NodeKind::Unary,
            Node::Binary(_) => NodeKind::Binary,
            Node::Block(_) => NodeKind::Block,
            Node::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            Node::Var(_) => NodeKind::Var,
            Node::Return(_) => NodeKind::Return,
            Node::Throw(_) => NodeKind::Throw,
            Node::If(_) => NodeKind::If,
            Node::Try(_) => NodeKind::Try,
            Node::Catch(_) => NodeKind::Catch,
        }
    }

    /// Source and position metadata.
    pub fn meta(&self) -> NodeMeta<'ir> {
        match self {
            Node::Ident(n) => n.meta(),
            Node::Literal(n) => n.meta(),
            Node::Unary(n) => n.meta(),
            Node::Binary(n) => n.meta(),
            Node::Block(n) => n.meta(),
            Node::ExpressionStatement(n) => n.meta(),
            Node::Var(n) => n.meta(),
            Node::Return(n) => n.meta(),
            Node::Throw(n) => n.meta(),
            Node::If(n) => n.meta(),
            Node::Try(n) => n.meta(),
            Node::Catch(n) => n.meta(),
        }
    }

    /// Whether `self` and `other` are the same node instance.
    pub fn same(self, other: Node<'ir>) -> bool {
        match (self, other) {
            (Node::Ident(a), Node::Ident(b)) => std::ptr::eq(a, b),
            (Node::Literal(a), Node::Literal(b)) => std::ptr::eq(a, b),
            (Node::Unary(a), Node::Unary(b)) => std::ptr::eq(a, b),
            (Node::Binary(a), Node::Binary(b)) => std::ptr::eq(a, b),
            (Node::Block(a), Node::Block(b)) => std::ptr::eq(a, b),
            (Node::ExpressionStatement(a), Node::ExpressionStatement(b)) => std::ptr::eq(a, b),
            (Node::Var(a), Node::Var(b)) => std::ptr::eq(a, b),
            (Node::Return(a), Node::Return(b)) => std::ptr::eq(a, b),
            (Node::Throw(a), Node::Throw(b)) => std::ptr::eq(a, b),
            (Node::If(a), Node::If(b)) => std::ptr::eq(a, b),
            (Node::Try(a), Node::Try(b)) => std::ptr::eq(a, b),
            (Node::Catch(a), Node::Catch(b)) => std::ptr::eq(a, b),
            _ => false,
        }
    }

    /// Identity comparison for optional children.
    pub fn same_opt(a: Option<Node<'ir>>, b: Option<Node<'ir>>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same(b),
            _ => false,
        }
    }

    /// Traverse this node with `visitor`, returning its replacement.
    ///
    /// Never mutates `self`. The result is `self` when the visitor declines
    /// to descend, or whatever the variant's leave hook returns otherwise.
    pub fn accept<V>(self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        match self {
            Node::Ident(n) => n.accept(arena, visitor),
            Node::Literal(n) => n.accept(arena, visitor),
            Node::Unary(n) => n.accept(arena, visitor),
            Node::Binary(n) => n.accept(arena, visitor),
            Node::Block(n) => n.accept(arena, visitor),
            Node::ExpressionStatement(n) => n.accept(arena, visitor),
            Node::Var(n) => n.accept(arena, visitor),
            Node::Return(n) => n.accept(arena, visitor),
            Node::Throw(n) => n.accept(arena, visitor),
            Node::If(n) => n.accept(arena, visitor),
            Node::Try(n) => n.accept(arena, visitor),
            Node::Catch(n) => n.accept(arena, visitor),
        }
    }

    /// Whether control can never fall through this node.
    pub fn is_terminal(&self) -> bool {
        match self {
            Node::Ident(_) | Node::Literal(_) | Node::Unary(_) | Node::Binary(_) => false,
            Node::Block(n) => n.is_terminal(),
            Node::ExpressionStatement(_) | Node::Var(_) => false,
            Node::Return(_) | Node::Throw(_) => true,
            Node::If(n) => n.is_terminal(),
            Node::Try(n) => n.is_terminal(),
            Node::Catch(n) => n.is_terminal(),
        }
    }

    /// Append this node's canonical text to `sink`.
    pub fn render(&self, sink: &mut String) {
        match self {
            Node::Ident(n) => n.render(sink),
            Node::Literal(n) => n.render(sink),
            Node::Unary(n) => n.render(sink),
            Node::Binary(n) => n.render(sink),
            Node::Block(n) => n.render(sink),
            Node::ExpressionStatement(n) => n.render(sink),
            Node::Var(n) => n.render(sink),
            Node::Return(n) => n.render(sink),
            Node::Throw(n) => n.render(sink),
            Node::If(n) => n.render(sink),
            Node::Try(n) => n.render(sink),
            Node::Catch(n) => n.render(sink),
        }
    }

    pub fn as_ident(&self) -> Option<&'ir IdentNode<'ir>> {
        match *self {
            Node::Ident(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&'ir LiteralNode<'ir>> {
        match *self {
            Node::Literal(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&'ir Block<'ir>> {
        match *self {
            Node::Block(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_catch(&self) -> Option<&'ir CatchNode<'ir>> {
        match *self {
            Node::Catch(n) => Some(n),
            _ => None,
        }
    }

    /// Narrow a rewritten child back to an identifier for a typed slot.
    pub(crate) fn expect_ident(
        self,
        parent: NodeKind,
        slot: &'static str,
    ) -> IrResult<&'ir IdentNode<'ir>> {
        self.as_ident()
            .ok_or_else(|| self.mismatch(parent, slot, NodeKind::Ident))
    }

    /// Narrow a rewritten child back to a block for a typed slot.
    pub(crate) fn expect_block(
        self,
        parent: NodeKind,
        slot: &'static str,
    ) -> IrResult<&'ir Block<'ir>> {
        self.as_block()
            .ok_or_else(|| self.mismatch(parent, slot, NodeKind::Block))
    }

    /// Narrow a rewritten child back to a catch clause for a typed slot.
    pub(crate) fn expect_catch(
        self,
        parent: NodeKind,
        slot: &'static str,
    ) -> IrResult<&'ir CatchNode<'ir>> {
        self.as_catch()
            .ok_or_else(|| self.mismatch(parent, slot, NodeKind::Catch))
    }

    fn mismatch(self, parent: NodeKind, slot: &'static str, expected: NodeKind) -> IrError {
        IrError::SlotKindMismatch {
            parent,
            slot,
            expected,
            found: self.kind(),
        }
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sink = String::new();
        self.render(&mut sink);
        f.write_str(&sink)
    }
}
