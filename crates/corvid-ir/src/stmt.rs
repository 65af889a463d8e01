//! Statement nodes.
//!
//! Provides nodes for:
//! - Blocks
//! - Expression statements and `var` declarations
//! - Jump statements (`return`, `throw`)
//! - Control flow (`if`)
//! - Exception handling (`try`; the catch clause lives in [`crate::catch`])

use corvid_core::{Source, Token};

use crate::arena::IrArena;
use crate::catch::CatchNode;
use crate::error::IrResult;
use crate::expr::IdentNode;
use crate::node::{Node, NodeKind, NodeMeta};
use crate::visitor::Visitor;

// ============================================================================
// Blocks
// ============================================================================

/// An ordered sequence of statements.
#[derive(Debug)]
pub struct Block<'ir> {
    meta: NodeMeta<'ir>,
    statements: &'ir [Node<'ir>],
}

impl<'ir> Block<'ir> {
    /// Create a block. The statement list is copied into the arena.
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        statements: &[Node<'ir>],
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            statements: arena.alloc_slice(statements),
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn statements(&self) -> &'ir [Node<'ir>] {
        self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Copy-on-write: `self` if every statement is identical to the
    /// current one at the same index.
    pub fn with_statements(&'ir self, arena: IrArena<'ir>, statements: &[Node<'ir>]) -> &'ir Self {
        let unchanged = statements.len() == self.statements.len()
            && self
                .statements
                .iter()
                .zip(statements)
                .all(|(a, b)| a.same(*b));
        if unchanged {
            return self;
        }
        arena.alloc(Self {
            meta: self.meta,
            statements: arena.alloc_slice(statements),
        })
    }

    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_block(self) {
            return Ok(Node::Block(self));
        }
        let statements = arena.map_shared(
            self.statements,
            |stmt| stmt.accept(arena, visitor),
            Node::same,
        )?;
        let block = if std::ptr::eq(statements, self.statements) {
            self
        } else {
            arena.alloc(Self {
                meta: self.meta,
                statements,
            })
        };
        Ok(visitor.leave_block(block))
    }

    /// A block is terminal once any of its statements is: nothing after a
    /// terminal statement is reachable.
    pub fn is_terminal(&self) -> bool {
        self.statements.iter().any(Node::is_terminal)
    }

    pub fn render(&self, sink: &mut String) {
        if self.statements.is_empty() {
            sink.push_str("{}");
            return;
        }
        sink.push('{');
        for stmt in self.statements {
            sink.push(' ');
            stmt.render(sink);
            sink.push(';');
        }
        sink.push_str(" }");
    }
}

// ============================================================================
// Simple statements
// ============================================================================

/// An expression evaluated for its side effects.
#[derive(Debug)]
pub struct ExpressionStatement<'ir> {
    meta: NodeMeta<'ir>,
    expression: Node<'ir>,
}

impl<'ir> ExpressionStatement<'ir> {
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        expression: Node<'ir>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            expression,
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn expression(&self) -> Node<'ir> {
        self.expression
    }

    pub fn with_expression(&'ir self, arena: IrArena<'ir>, expression: Node<'ir>) -> &'ir Self {
        if self.expression.same(expression) {
            return self;
        }
        arena.alloc(Self {
            meta: self.meta,
            expression,
        })
    }

    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_expression_statement(self) {
            return Ok(Node::ExpressionStatement(self));
        }
        let expression = self.expression.accept(arena, visitor)?;
        Ok(visitor.leave_expression_statement(self.with_expression(arena, expression)))
    }

    pub fn render(&self, sink: &mut String) {
        self.expression.render(sink);
    }
}

/// A `var` declaration with an optional initializer.
#[derive(Debug)]
pub struct VarNode<'ir> {
    meta: NodeMeta<'ir>,
    name: &'ir IdentNode<'ir>,
    init: Option<Node<'ir>>,
}

impl<'ir> VarNode<'ir> {
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        name: &'ir IdentNode<'ir>,
        init: Option<Node<'ir>>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            name,
            init,
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn name(&self) -> &'ir IdentNode<'ir> {
        self.name
    }

    pub fn init(&self) -> Option<Node<'ir>> {
        self.init
    }

    pub fn with_name(&'ir self, arena: IrArena<'ir>, name: &'ir IdentNode<'ir>) -> &'ir Self {
        self.with_children(arena, name, self.init)
    }

    pub fn with_init(&'ir self, arena: IrArena<'ir>, init: Option<Node<'ir>>) -> &'ir Self {
        self.with_children(arena, self.name, init)
    }

    fn with_children(
        &'ir self,
        arena: IrArena<'ir>,
        name: &'ir IdentNode<'ir>,
        init: Option<Node<'ir>>,
    ) -> &'ir Self {
        if std::ptr::eq(self.name, name) && Node::same_opt(self.init, init) {
            return self;
        }
        arena.alloc(Self {
            meta: self.meta,
            name,
            init,
        })
    }

    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_var(self) {
            return Ok(Node::Var(self));
        }
        let name = self
            .name
            .accept(arena, visitor)?
            .expect_ident(NodeKind::Var, "name")?;
        let init = match self.init {
            Some(init) => Some(init.accept(arena, visitor)?),
            None => None,
        };
        Ok(visitor.leave_var(self.with_children(arena, name, init)))
    }

    pub fn render(&self, sink: &mut String) {
        sink.push_str("var ");
        self.name.render(sink);
        if let Some(init) = self.init {
            sink.push_str(" = ");
            init.render(sink);
        }
    }
}

// ============================================================================
// Jump statements
// ============================================================================

/// A `return` statement with an optional value.
#[derive(Debug)]
pub struct ReturnNode<'ir> {
    meta: NodeMeta<'ir>,
    expression: Option<Node<'ir>>,
}

impl<'ir> ReturnNode<'ir> {
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        expression: Option<Node<'ir>>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            expression,
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn expression(&self) -> Option<Node<'ir>> {
        self.expression
    }

    pub fn with_expression(
        &'ir self,
        arena: IrArena<'ir>,
        expression: Option<Node<'ir>>,
    ) -> &'ir Self {
        if Node::same_opt(self.expression, expression) {
            return self;
        }
        arena.alloc(Self {
            meta: self.meta,
            expression,
        })
    }

    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_return(self) {
            return Ok(Node::Return(self));
        }
        let expression = match self.expression {
            Some(expr) => Some(expr.accept(arena, visitor)?),
            None => None,
        };
        Ok(visitor.leave_return(self.with_expression(arena, expression)))
    }

    pub fn render(&self, sink: &mut String) {
        sink.push_str("return");
        if let Some(expr) = self.expression {
            sink.push(' ');
            expr.render(sink);
        }
    }
}

/// A `throw` statement.
#[derive(Debug)]
pub struct ThrowNode<'ir> {
    meta: NodeMeta<'ir>,
    expression: Node<'ir>,
}

impl<'ir> ThrowNode<'ir> {
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        expression: Node<'ir>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            expression,
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn expression(&self) -> Node<'ir> {
        self.expression
    }

    pub fn with_expression(&'ir self, arena: IrArena<'ir>, expression: Node<'ir>) -> &'ir Self {
        if self.expression.same(expression) {
            return self;
        }
        arena.alloc(Self {
            meta: self.meta,
            expression,
        })
    }

    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_throw(self) {
            return Ok(Node::Throw(self));
        }
        let expression = self.expression.accept(arena, visitor)?;
        Ok(visitor.leave_throw(self.with_expression(arena, expression)))
    }

    pub fn render(&self, sink: &mut String) {
        sink.push_str("throw ");
        self.expression.render(sink);
    }
}

// ============================================================================
// Control flow
// ============================================================================

/// An `if` statement with an optional `else` block.
#[derive(Debug)]
pub struct IfNode<'ir> {
    meta: NodeMeta<'ir>,
    test: Node<'ir>,
    pass: &'ir Block<'ir>,
    fail: Option<&'ir Block<'ir>>,
}

impl<'ir> IfNode<'ir> {
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        test: Node<'ir>,
        pass: &'ir Block<'ir>,
        fail: Option<&'ir Block<'ir>>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            test,
            pass,
            fail,
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn test(&self) -> Node<'ir> {
        self.test
    }

    pub fn pass(&self) -> &'ir Block<'ir> {
        self.pass
    }

    pub fn fail(&self) -> Option<&'ir Block<'ir>> {
        self.fail
    }

    pub fn with_test(&'ir self, arena: IrArena<'ir>, test: Node<'ir>) -> &'ir Self {
        self.with_children(arena, test, self.pass, self.fail)
    }

    pub fn with_pass(&'ir self, arena: IrArena<'ir>, pass: &'ir Block<'ir>) -> &'ir Self {
        self.with_children(arena, self.test, pass, self.fail)
    }

    pub fn with_fail(&'ir self, arena: IrArena<'ir>, fail: Option<&'ir Block<'ir>>) -> &'ir Self {
        self.with_children(arena, self.test, self.pass, fail)
    }

    fn with_children(
        &'ir self,
        arena: IrArena<'ir>,
        test: Node<'ir>,
        pass: &'ir Block<'ir>,
        fail: Option<&'ir Block<'ir>>,
    ) -> &'ir Self {
        let same_fail = match (self.fail, fail) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            _ => false,
        };
        if self.test.same(test) && std::ptr::eq(self.pass, pass) && same_fail {
            return self;
        }
        arena.alloc(Self {
            meta: self.meta,
            test,
            pass,
            fail,
        })
    }

    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_if(self) {
            return Ok(Node::If(self));
        }
        let test = self.test.accept(arena, visitor)?;
        let pass = self
            .pass
            .accept(arena, visitor)?
            .expect_block(NodeKind::If, "pass")?;
        let fail = match self.fail {
            Some(fail) => Some(
                fail.accept(arena, visitor)?
                    .expect_block(NodeKind::If, "fail")?,
            ),
            None => None,
        };
        Ok(visitor.leave_if(self.with_children(arena, test, pass, fail)))
    }

    /// Terminal only when both branches exist and neither falls through.
    pub fn is_terminal(&self) -> bool {
        self.pass.is_terminal() && self.fail.is_some_and(|fail| fail.is_terminal())
    }

    pub fn render(&self, sink: &mut String) {
        sink.push_str("if (");
        self.test.render(sink);
        sink.push_str(") ");
        self.pass.render(sink);
        if let Some(fail) = self.fail {
            sink.push_str(" else ");
            fail.render(sink);
        }
    }
}

// ============================================================================
// Exception handling
// ============================================================================

/// A `try` statement with its catch clauses and optional `finally` block.
#[derive(Debug)]
pub struct TryNode<'ir> {
    meta: NodeMeta<'ir>,
    body: &'ir Block<'ir>,
    catches: &'ir [&'ir CatchNode<'ir>],
    finally: Option<&'ir Block<'ir>>,
}

impl<'ir> TryNode<'ir> {
    /// Create a try statement. The catch list is copied into the arena.
    pub fn new(
        arena: IrArena<'ir>,
        source: &'ir Source,
        token: Token,
        finish: u32,
        body: &'ir Block<'ir>,
        catches: &[&'ir CatchNode<'ir>],
        finally: Option<&'ir Block<'ir>>,
    ) -> &'ir Self {
        arena.alloc(Self {
            meta: NodeMeta::new(source, token, finish),
            body,
            catches: arena.alloc_slice(catches),
            finally,
        })
    }

    pub fn meta(&self) -> NodeMeta<'ir> {
        self.meta
    }

    pub fn body(&self) -> &'ir Block<'ir> {
        self.body
    }

    pub fn catches(&self) -> &'ir [&'ir CatchNode<'ir>] {
        self.catches
    }

    pub fn finally(&self) -> Option<&'ir Block<'ir>> {
        self.finally
    }

    pub fn with_body(&'ir self, arena: IrArena<'ir>, body: &'ir Block<'ir>) -> &'ir Self {
        self.with_children(arena, body, self.catches, self.finally)
    }

    /// Copy-on-write over the catch list; the list is copied into the
    /// arena only when some clause differs.
    pub fn with_catches(
        &'ir self,
        arena: IrArena<'ir>,
        catches: &[&'ir CatchNode<'ir>],
    ) -> &'ir Self {
        if same_clauses(self.catches, catches) {
            return self;
        }
        self.with_children(arena, self.body, arena.alloc_slice(catches), self.finally)
    }

    pub fn with_finally(
        &'ir self,
        arena: IrArena<'ir>,
        finally: Option<&'ir Block<'ir>>,
    ) -> &'ir Self {
        self.with_children(arena, self.body, self.catches, finally)
    }

    fn with_children(
        &'ir self,
        arena: IrArena<'ir>,
        body: &'ir Block<'ir>,
        catches: &'ir [&'ir CatchNode<'ir>],
        finally: Option<&'ir Block<'ir>>,
    ) -> &'ir Self {
        let same_finally = match (self.finally, finally) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            _ => false,
        };
        if std::ptr::eq(self.body, body) && same_clauses(self.catches, catches) && same_finally {
            return self;
        }
        arena.alloc(Self {
            meta: self.meta,
            body,
            catches,
            finally,
        })
    }

    pub fn accept<V>(&'ir self, arena: IrArena<'ir>, visitor: &mut V) -> IrResult<Node<'ir>>
    where
        V: Visitor<'ir> + ?Sized,
    {
        if !visitor.enter_try(self) {
            return Ok(Node::Try(self));
        }
        let body = self
            .body
            .accept(arena, visitor)?
            .expect_block(NodeKind::Try, "body")?;
        let catches = arena.map_shared(
            self.catches,
            |clause| {
                clause
                    .accept(arena, visitor)?
                    .expect_catch(NodeKind::Try, "catches")
            },
            |a, b| std::ptr::eq(a, b),
        )?;
        let finally = match self.finally {
            Some(finally) => Some(
                finally
                    .accept(arena, visitor)?
                    .expect_block(NodeKind::Try, "finally")?,
            ),
            None => None,
        };
        Ok(visitor.leave_try(self.with_children(arena, body, catches, finally)))
    }

    /// Terminal when the `finally` block never falls through, or when the
    /// body and every catch clause never fall through.
    pub fn is_terminal(&self) -> bool {
        if self.finally.is_some_and(|finally| finally.is_terminal()) {
            return true;
        }
        self.body.is_terminal() && self.catches.iter().all(|clause| clause.is_terminal())
    }

    /// Renders the whole statement; each catch clause renders its own head
    /// and the body is rendered here.
    pub fn render(&self, sink: &mut String) {
        sink.push_str("try ");
        self.body.render(sink);
        for clause in self.catches {
            clause.render(sink);
            sink.push(' ');
            clause.body().render(sink);
        }
        if let Some(finally) = self.finally {
            sink.push_str(" finally ");
            finally.render(sink);
        }
    }
}

fn same_clauses(a: &[&CatchNode<'_>], b: &[&CatchNode<'_>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| std::ptr::eq(*x, *y))
}
