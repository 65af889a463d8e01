//! Expression nodes.
//!
//! Expressions never terminate control flow on their own, so none of these
//! kinds participate in terminality.

use corvid_core::{Source, Token};

use crate::arena::IrArena;
use crate::error::IrResult;
use crate::node::{Node, NodeMeta};
use crate::ops::{BinaryOp, UnaryOp};
use crate::render;
use crate::visitor::Visitor;

// ============================================================================
// Identifiers
// ============================================================================

/// An identifier reference or binding.
#[derive(Debug)]
pub struct IdentNode<'ir> {
    meta: NodeMeta<'ir>,
    name: &'ir str,
}

impl<'ir> IdentNode<'ir> {
    /// Create an identifier. The name is copied into the arena.
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        name: &str,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            name: arena.alloc_str(name),
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn name(&self) -> &'ir str {
        self.name
    }

    /// Leaf node: runs the enter and leave hooks only.
    pub fn accept<V>(&'ir self, _arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if visitor.enter_ident(self) {
            return Ok(visitor.leave_ident(self));
        }
        Ok(Node::Ident(self))
    }

    pub fn render(&self, sink: &mut String) {
        sink.push_str(self.name);
    }
}

// ============================================================================
// Literals
// ============================================================================

/// The value of a literal node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'ir> {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(&'ir str),
}

impl LiteralValue<'_> {
    /// The `typeof` result for this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralValue::Null => "object",
            LiteralValue::Undefined => "undefined",
            LiteralValue::Bool(_) => "boolean",
            LiteralValue::Number(_) => "number",
            LiteralValue::String(_) => "string",
        }
    }

    /// Truthiness of this value.
    pub fn is_truthy(&self) -> bool {
        match *self {
            LiteralValue::Null | LiteralValue::Undefined => false,
            LiteralValue::Bool(b) => b,
            LiteralValue::Number(n) => n != 0.0 && !n.is_nan(),
            LiteralValue::String(s) => !s.is_empty(),
        }
    }

    /// `===` between two literal values.
    pub fn strict_equals(&self, other: &LiteralValue<'_>) -> bool {
        match (*self, *other) {
            (LiteralValue::Null, LiteralValue::Null) => true,
            (LiteralValue::Undefined, LiteralValue::Undefined) => true,
            (LiteralValue::Bool(a), LiteralValue::Bool(b)) => a == b,
            (LiteralValue::Number(a), LiteralValue::Number(b)) => a == b,
            (LiteralValue::String(a), LiteralValue::String(b)) => a == b,
            _ => false,
        }
    }
}

/// A literal constant.
#[derive(Debug)]
pub struct LiteralNode<'ir> {
    meta: NodeMeta<'ir>,
    value: LiteralValue<'ir>,
}

impl<'ir> LiteralNode<'ir> {
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        value: LiteralValue<'ir>,
    ) -> &'ir Self {
        Self::from_meta(arena, NodeMeta::new(source, token, finish), value)
    }

    /// Create a literal that takes over the metadata of another node, as
    /// when a pass replaces an expression by its folded value.
    pub fn from_meta(
        arena: IrArena<'ir>,
        meta: NodeMeta<'ir>,
        value: LiteralValue<'ir>,
    ) -> &'ir Self {
        arena.alloc(Self { meta, value })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn value(&self) -> LiteralValue<'ir> {
        self.value
    }

    pub fn accept<V>(&'ir self, _arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if visitor.enter_literal(self) {
            return Ok(visitor.leave_literal(self));
        }
        Ok(Node::Literal(self))
    }

    pub fn render(&self, sink: &mut String) {
        match self.value {
            LiteralValue::Null => sink.push_str("null"),
            LiteralValue::Undefined => sink.push_str("undefined"),
            LiteralValue::Bool(b) => sink.push_str(if b { "true" } else { "false" }),
            LiteralValue::Number(n) => render::number(sink, n),
            LiteralValue::String(s) => render::quoted(sink, s),
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

/// A prefix unary expression.
#[derive(Debug)]
pub struct UnaryNode<'ir> {
    meta: NodeMeta<'ir>,
    op: UnaryOp,
    operand: Node<'ir>,
}

impl<'ir> UnaryNode<'ir> {
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        op: UnaryOp,
        operand: Node<'ir>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            op,
            operand,
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn op(&self) -> UnaryOp {
        self.op
    }

    pub fn operand(&self) -> Node<'ir> {
        self.operand
    }

    /// Copy-on-write: `self` if `operand` is the current operand.
    pub fn with_operand(&'ir self, arena: IrArena<'ir>, operand: Node<'ir>) -> &'ir Self {
        if self.operand.same(operand) {
            return self;
        }
        arena.alloc(Self {
            meta: self.meta,
            op: self.op,
            operand,
        })
    }

    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_unary(self) {
            return Ok(Node::Unary(self));
        }
        let operand = self.operand.accept(arena, visitor)?;
        Ok(visitor.leave_unary(self.with_operand(arena, operand)))
    }

    pub fn render(&self, sink: &mut String) {
        sink.push_str(self.op.token().name());
        if self.op.token().is_word() {
            sink.push(' ');
        }
        render::unary_operand(sink, self.op, self.operand);
    }
}

/// A binary expression.
#[derive(Debug)]
pub struct BinaryNode<'ir> {
    meta: NodeMeta<'ir>,
    op: BinaryOp,
    lhs: Node<'ir>,
    rhs: Node<'ir>,
}

impl<'ir> BinaryNode<'ir> {
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        op: BinaryOp,
        lhs: Node<'ir>,
        rhs: Node<'ir>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            op,
            lhs,
            rhs,
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn op(&self) -> BinaryOp {
        self.op
    }

    pub fn lhs(&self) -> Node<'ir> {
        self.lhs
    }

    pub fn rhs(&self) -> Node<'ir> {
        self.rhs
    }

    pub fn with_lhs(&'ir self, arena: IrArena<'ir>, lhs: Node<'ir>) -> &'ir Self {
        self.with_operands(arena, lhs, self.rhs)
    }

    pub fn with_rhs(&'ir self, arena: IrArena<'ir>, rhs: Node<'ir>) -> &'ir Self {
        self.with_operands(arena, self.lhs, rhs)
    }

    /// Copy-on-write over both operands; allocates at most once.
    pub fn with_operands(
        &'ir self,
        arena: IrArena<'ir>,
        lhs: Node<'ir>,
        rhs: Node<'ir>,
    ) -> &'ir Self {
        if self.lhs.same(lhs) && self.rhs.same(rhs) {
            return self;
        }
        arena.alloc(Self {
            meta: self.meta,
            op: self.op,
            lhs,
            rhs,
        })
    }

    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_binary(self) {
            return Ok(Node::Binary(self));
        }
        let lhs = self.lhs.accept(arena, visitor)?;
        let rhs = self.rhs.accept(arena, visitor)?;
        Ok(visitor.leave_binary(self.with_operands(arena, lhs, rhs)))
    }

    pub fn render(&self, sink: &mut String) {
        let prec = self.op.precedence();
        render::operand(sink, self.lhs, prec, false);
        sink.push(' ');
        sink.push_str(self.op.token().name());
        sink.push(' ');
        render::operand(sink, self.rhs, prec, true);
    }
}
