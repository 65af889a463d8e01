//! The catch clause of a `try` statement.
//!
//! A [`CatchNode`] represents `catch (exception [if condition]) { body }`:
//!
//! - `exception`: the identifier the caught value is bound to (required)
//! - `condition`: an optional guard; without one the clause catches
//!   unconditionally
//! - `body`: the block run when the guard (if any) holds (required)
//!
//! The guard is an engine extension beyond standard exception handling.
//! Whether a tree may contain one is decided by
//! [`IrOptions::conditional_catch`](crate::IrOptions::conditional_catch) and
//! enforced by [`ConditionalCatchCheck`](crate::passes::ConditionalCatchCheck).

use corvid_core::{Source, Token};

use crate::arena::IrArena;
use crate::error::IrResult;
use crate::expr::IdentNode;
use crate::node::{Node, NodeKind, NodeMeta};
use crate::stmt::Block;
use crate::visitor::Visitor;

/// A catch clause.
///
/// All three children are owned by the clause; none of them is shared with
/// another parent in the same tree version. The `with_*` methods never
/// mutate the clause: they return it unchanged when given its current
/// child, and otherwise a new clause with the same metadata and the other
/// children shared.
#[derive(Debug)]
pub struct CatchNode<'ir> {
    meta: NodeMeta<'ir>,
    exception: &'ir IdentNode<'ir>,
    exception_condition: Option<Node<'ir>>,
    body: &'ir Block<'ir>,
}

impl<'ir> CatchNode<'ir> {
    /// Create a catch clause.
    ///
    /// # Arguments
    ///
    /// * `source` - The source the clause was parsed from
    /// * `token` - The `catch` token
    /// * `finish` - Offset one past the closing parenthesis of the head
    /// * `exception` - Name the caught value is bound to
    /// * `exception_condition` - Optional guard expression
    /// * `body` - The clause body
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        exception: &'ir IdentNode<'ir>,
        exception_condition: Option<Node<'ir>>,
        body: &'ir Block<'ir>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            exception,
            exception_condition,
            body,
        })
    }

    /// Copy constructor used by rewrites: keeps this clause's metadata and
    /// substitutes the children.
    fn copy_with(
        &self,
        arena: IrArena<'ir>,
        exception: &'ir IdentNode<'ir>,
        exception_condition: Option<Node<'ir>>,
        body: &'ir Block<'ir>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: self.meta,
            exception,
            exception_condition,
            body,
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    /// The identifier the caught value is bound to.
    pub fn exception(&self) -> &'ir IdentNode<'ir> {
        self.exception
    }

    /// The guard expression, if this is a conditional catch.
    pub fn exception_condition(&self) -> Option<Node<'ir>> {
        self.exception_condition
    }

    /// The clause body.
    pub fn body(&self) -> &'ir Block<'ir> {
        self.body
    }

    /// Whether the clause carries a guard.
    pub fn is_conditional(&self) -> bool {
        self.exception_condition.is_some()
    }

    /// Replace the exception identifier. Returns `self` if `exception` is
    /// the current identifier.
    pub fn with_exception(
        &'ir self,
        arena: IrArena<'ir>,
        exception: &'ir IdentNode<'ir>,
    ) -> &'ir Self {
        self.with_children(arena, exception, self.exception_condition, self.body)
    }

    /// Replace (or remove) the guard. Returns `self` if `exception_condition`
    /// is the current guard.
    pub fn with_exception_condition(
        &'ir self,
        arena: IrArena<'ir>,
        exception_condition: Option<Node<'ir>>,
    ) -> &'ir Self {
        self.with_children(arena, self.exception, exception_condition, self.body)
    }

    /// Replace the body. Returns `self` if `body` is the current body.
    pub fn with_body(&'ir self, arena: IrArena<'ir>, body: &'ir Block<'ir>) -> &'ir Self {
        self.with_children(arena, self.exception, self.exception_condition, body)
    }

    /// Substitute any subset of the children, allocating at most one node.
    fn with_children(
        &'ir self,
        arena: IrArena<'ir>,
        exception: &'ir IdentNode<'ir>,
        exception_condition: Option<Node<'ir>>,
        body: &'ir Block<'ir>,
    ) -> &'ir Self {
        if std::ptr::eq(self.exception, exception)
            && Node::same_opt(self.exception_condition, exception_condition)
            && std::ptr::eq(self.body, body)
        {
            return self;
        }
        self.copy_with(arena, exception, exception_condition, body)
    }

    /// Visit the exception identifier, then the guard (skipped entirely when
    /// absent), then the body.
    ///
    /// The identifier comes first so that passes binding names see the
    /// binding before the guard that may refer to it.
    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_catch(self) {
            return Ok(Node::Catch(self));
        }

        let exception = self
            .exception
            .accept(arena, visitor)?
            .expect_ident(NodeKind::Catch, "exception")?;
        let exception_condition = match self.exception_condition {
            Some(condition) => Some(condition.accept(arena, visitor)?),
            None => None,
        };
        let body = self
            .body
            .accept(arena, visitor)?
            .expect_block(NodeKind::Catch, "body")?;

        let clause = self.with_children(arena, exception, exception_condition, body);
        Ok(visitor.leave_catch(clause))
    }

    /// A clause never falls through exactly when its body never does.
    pub fn is_terminal(&self) -> bool {
        self.body.is_terminal()
    }

    /// Render the clause head only: ` catch (e)` or ` catch (e if cond)`.
    /// The body is rendered by the enclosing `try`.
    pub fn render(&self, sink: &mut String) {
        sink.push_str(" catch (");
        self.exception.render(sink);

        if let Some(condition) = self.exception_condition {
            sink.push_str(" if ");
            condition.render(sink);
        }
        sink.push(')');
    }
}
