//! Convenience construction of IR trees.
//!
//! [`IrBuilder`] is used by passes that synthesize nodes and by tests. It
//! does not parse: every node it creates gets a synthetic position at the
//! builder's cursor, which advances by the length of the node's leading
//! token so that sibling nodes never share a start offset.

use std::cell::Cell;

use corvid_core::{Source, Token, TokenType};

use crate::arena::IrArena;
use crate::catch::CatchNode;
use crate::expr::{BinaryNode, IdentNode, LiteralNode, LiteralValue, UnaryNode};
use crate::node::Node;
use crate::ops::{BinaryOp, UnaryOp};
use crate::stmt::{Block, ExpressionStatement, IfNode, ReturnNode, ThrowNode, TryNode, VarNode};

/// Allocates nodes into an arena against a single source.
pub struct IrBuilder<'ir> {
    arena: IrArena<'ir>,
    source: &'ir Source,
    cursor: Cell<u32>,
}

impl<'ir> IrBuilder<'ir> {
    pub fn new(arena: IrArena<'ir>, source: &'ir Source) -> Self {
        Self {
            arena,
            source,
            cursor: Cell::new(0),
        }
    }

    pub fn arena(&self) -> IrArena<'ir> {
        self.arena
    }

    pub fn source(&self) -> &'ir Source {
        self.source
    }

    /// Claim the next synthetic token and its finish offset.
    fn token(&self, kind: TokenType, length: usize) -> (Token, u32) {
        let length = u32::try_from(length).unwrap_or(u32::MAX).max(1);
        let start = self.cursor.get();
        let finish = start.saturating_add(length);
        self.cursor.set(finish.saturating_add(1));
        (Token::new(kind, start, length), finish)
    }

    // === Expressions ===

    pub fn ident(&self, name: &str) -> &'ir IdentNode<'ir> {
        let (token, finish) = self.token(TokenType::Ident, name.len());
        IdentNode::new(self.arena, self.source, token, finish, name)
    }

    pub fn literal(&self, value: LiteralValue<'ir>) -> &'ir LiteralNode<'ir> {
        let kind = match value {
            LiteralValue::Null => TokenType::Null,
            LiteralValue::Undefined => TokenType::Ident,
            LiteralValue::Bool(true) => TokenType::True,
            LiteralValue::Bool(false) => TokenType::False,
            LiteralValue::Number(_) => TokenType::Decimal,
            LiteralValue::String(_) => TokenType::String,
        };
        let (token, finish) = self.token(kind, 1);
        LiteralNode::new(self.arena, self.source, token, finish, value)
    }

    pub fn null(&self) -> &'ir LiteralNode<'ir> {
        self.literal(LiteralValue::Null)
    }

    pub fn undefined(&self) -> &'ir LiteralNode<'ir> {
        self.literal(LiteralValue::Undefined)
    }

    pub fn boolean(&self, value: bool) -> &'ir LiteralNode<'ir> {
        self.literal(LiteralValue::Bool(value))
    }

    pub fn number(&self, value: f64) -> &'ir LiteralNode<'ir> {
        self.literal(LiteralValue::Number(value))
    }

    /// A string literal. The text is copied into the arena.
    pub fn string(&self, value: &str) -> &'ir LiteralNode<'ir> {
        self.literal(LiteralValue::String(self.arena.alloc_str(value)))
    }

    pub fn unary(&self, op: UnaryOp, operand: Node<'ir>) -> &'ir UnaryNode<'ir> {
        let kind = op.token();
        let (token, finish) = self.token(kind, kind.name().len());
        UnaryNode::new(self.arena, self.source, token, finish, op, operand)
    }

    pub fn binary(&self, op: BinaryOp, lhs: Node<'ir>, rhs: Node<'ir>) -> &'ir BinaryNode<'ir> {
        let kind = op.token();
        let (token, finish) = self.token(kind, kind.name().len());
        BinaryNode::new(self.arena, self.source, token, finish, op, lhs, rhs)
    }

    // === Statements ===

    pub fn block(&self, statements: &[Node<'ir>]) -> &'ir Block<'ir> {
        let (token, finish) = self.token(TokenType::LBrace, 1);
        Block::new(self.arena, self.source, token, finish, statements)
    }

    pub fn expr_stmt(&self, expression: Node<'ir>) -> &'ir ExpressionStatement<'ir> {
        let (token, finish) = self.token(TokenType::Semicolon, 1);
        ExpressionStatement::new(self.arena, self.source, token, finish, expression)
    }

    pub fn var(&self, name: &str, init: Option<Node<'ir>>) -> &'ir VarNode<'ir> {
        let (token, finish) = self.token(TokenType::Var, 3);
        let name = self.ident(name);
        VarNode::new(self.arena, self.source, token, finish, name, init)
    }

    pub fn ret(&self, expression: Option<Node<'ir>>) -> &'ir ReturnNode<'ir> {
        let (token, finish) = self.token(TokenType::Return, 6);
        ReturnNode::new(self.arena, self.source, token, finish, expression)
    }

    pub fn throw(&self, expression: Node<'ir>) -> &'ir ThrowNode<'ir> {
        let (token, finish) = self.token(TokenType::Throw, 5);
        ThrowNode::new(self.arena, self.source, token, finish, expression)
    }

    pub fn if_(
        &self,
        test: Node<'ir>,
        pass: &'ir Block<'ir>,
        fail: Option<&'ir Block<'ir>>,
    ) -> &'ir IfNode<'ir> {
        let (token, finish) = self.token(TokenType::If, 2);
        IfNode::new(self.arena, self.source, token, finish, test, pass, fail)
    }

    // === Exception handling ===

    pub fn try_(
        &self,
        body: &'ir Block<'ir>,
        catches: &[&'ir CatchNode<'ir>],
        finally: Option<&'ir Block<'ir>>,
    ) -> &'ir TryNode<'ir> {
        let (token, finish) = self.token(TokenType::Try, 3);
        TryNode::new(self.arena, self.source, token, finish, body, catches, finally)
    }

    pub fn catch(
        &self,
        exception: &'ir IdentNode<'ir>,
        exception_condition: Option<Node<'ir>>,
        body: &'ir Block<'ir>,
    ) -> &'ir CatchNode<'ir> {
        let (token, finish) = self.token(TokenType::Catch, 5);
        CatchNode::new(
            self.arena,
            self.source,
            token,
            finish,
            exception,
            exception_condition,
            body,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn positions_advance() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let b = IrBuilder::new(IrArena::new(&bump), &source);

        let first = b.ident("alpha");
        let second = b.ident("b");
        assert_eq!(first.meta().start(), 0);
        assert_eq!(first.meta().finish(), 5);
        assert!(second.meta().start() > first.meta().finish());
    }

    #[test]
    fn token_types_follow_node() {
        let bump = Bump::new();
        let source = Source::new("t.js", "");
        let b = IrBuilder::new(IrArena::new(&bump), &source);

        let clause = b.catch(b.ident("e"), None, b.block(&[]));
        assert_eq!(clause.meta().token().kind(), TokenType::Catch);
        assert_eq!(b.number(1.0).meta().token().kind(), TokenType::Decimal);
        assert_eq!(
            b.binary(BinaryOp::Add, Node::Literal(b.null()), Node::Literal(b.null()))
                .meta()
                .token()
                .kind(),
            TokenType::Add
        );
    }
}
