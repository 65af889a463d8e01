//! Checks a tree against the active [`IrOptions`].
//!
//! Reports:
//!
//! - an error for every guarded catch clause when
//!   [`IrOptions::conditional_catch`] is off
//! - a warning for every catch clause that follows an unguarded clause of
//!   the same `try`, since the unguarded one catches everything first

use corvid_core::{Diagnostic, Diagnostics};

use crate::arena::IrArena;
use crate::catch::CatchNode;
use crate::error::IrResult;
use crate::node::Node;
use crate::options::IrOptions;
use crate::stmt::TryNode;
use crate::visitor::Visitor;

/// Read-only pass reporting option violations as diagnostics.
pub struct ConditionalCatchCheck {
    options: IrOptions,
    diagnostics: Diagnostics,
}

impl ConditionalCatchCheck {
    pub fn new(options: IrOptions) -> Self {
        Self {
            options,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Run over `root` and return the collected findings.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run<'ir>(mut self, arena: IrArena<'ir>, root: Node<'ir>) -> IrResult<Diagnostics> {
        root.accept(arena, &mut self)?;
        Ok(self.diagnostics)
    }
}

impl<'ir> Visitor<'ir> for ConditionalCatchCheck {
    fn enter_try(&mut self, node: &'ir TryNode<'ir>) -> bool {
        let mut catches = node.catches().iter();
        if catches.by_ref().any(|clause| !clause.is_conditional()) {
            for unreachable in catches {
                let meta = unreachable.meta();
                self.diagnostics.push(Diagnostic::warning(
                    meta.source().name(),
                    meta.span(),
                    "catch clause is unreachable after an unconditional catch",
                ));
            }
        }
        true
    }

    fn enter_catch(&mut self, node: &'ir CatchNode<'ir>) -> bool {
        if node.is_conditional() && !self.options.conditional_catch {
            let meta = node.meta();
            self.diagnostics.push(Diagnostic::error(
                meta.source().name(),
                meta.span(),
                format!(
                    "conditional catch clause `catch ({} if ...)` is not enabled",
                    node.exception().name()
                ),
            ));
        }
        true
    }
}
