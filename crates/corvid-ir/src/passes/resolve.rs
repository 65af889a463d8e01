//! Resolution of identifiers against catch bindings.
//!
//! A catch clause binds its exception identifier for the guard and the
//! body. Traversal visits the identifier before either of them, so the
//! resolver can push the binding as soon as the identifier is seen and
//! pop it again when the clause is left. A use resolves to the innermost
//! active binding of the same name.
//!
//! Names declared by `var` are declarations, not uses, and are skipped.

use corvid_core::Position;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::arena::IrArena;
use crate::catch::CatchNode;
use crate::error::IrResult;
use crate::expr::IdentNode;
use crate::node::Node;
use crate::stmt::VarNode;
use crate::visitor::Visitor;

/// Result of [`CatchScopeResolver::run`].
#[derive(Debug, Default)]
pub struct ScopeOutput<'ir> {
    /// Every catch binding in traversal order.
    pub bindings: Vec<(&'ir str, Position)>,
    /// Position of each resolved use, mapped to the position of its binding.
    pub resolved: FxHashMap<Position, Position>,
    /// Names used without an enclosing catch binding.
    pub free: FxHashSet<&'ir str>,
}

impl ScopeOutput<'_> {
    /// The binding a use at `position` resolved to.
    pub fn binding_of(&self, position: Position) -> Option<Position> {
        self.resolved.get(&position).copied()
    }
}

/// Read-only pass resolving identifier uses to catch bindings.
#[derive(Default)]
pub struct CatchScopeResolver<'ir> {
    /// Active bindings per name, innermost last.
    scopes: FxHashMap<&'ir str, Vec<Position>>,
    /// The next identifier is the exception of the clause just entered.
    binding_next: bool,
    /// The next identifier is the name of the `var` just entered.
    declaring_next: bool,
    output: ScopeOutput<'ir>,
}

impl<'ir> CatchScopeResolver<'ir> {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self, arena: IrArena<'ir>, root: Node<'ir>) -> IrResult<ScopeOutput<'ir>> {
        root.accept(arena, &mut self)?;
        Ok(self.output)
    }

    fn bind(&mut self, ident: &'ir IdentNode<'ir>) {
        let position = ident.meta().position();
        self.scopes.entry(ident.name()).or_default().push(position);
        self.output.bindings.push((ident.name(), position));
    }

    fn resolve(&mut self, ident: &'ir IdentNode<'ir>) {
        let binding = self
            .scopes
            .get(ident.name())
            .and_then(|stack| stack.last().copied());

        match binding {
            Some(binding) => {
                self.output
                    .resolved
                    .insert(ident.meta().position(), binding);
            }
            None => {
                self.output.free.insert(ident.name());
            }
        }
    }
}

impl<'ir> Visitor<'ir> for CatchScopeResolver<'ir> {
    fn enter_catch(&mut self, _node: &'ir CatchNode<'ir>) -> bool {
        self.binding_next = true;
        true
    }

    fn leave_catch(&mut self, node: &'ir CatchNode<'ir>) -> Node<'ir> {
        let name = node.exception().name();
        if let Some(stack) = self.scopes.get_mut(name) {
            stack.pop();
            if stack.is_empty() {
                self.scopes.remove(name);
            }
        }
        Node::Catch(node)
    }

    fn enter_var(&mut self, _node: &'ir VarNode<'ir>) -> bool {
        self.declaring_next = true;
        true
    }

    fn enter_ident(&mut self, node: &'ir IdentNode<'ir>) -> bool {
        if std::mem::take(&mut self.binding_next) {
            self.bind(node);
        } else if !std::mem::take(&mut self.declaring_next) {
            self.resolve(node);
        }
        false
    }
}
