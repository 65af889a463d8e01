//! Options controlling which language extensions the IR admits.

/// Options shared by the passes that run over a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrOptions {
    /// Admit guarded catch clauses, `catch (e if cond)`.
    ///
    /// This is an engine extension beyond standard exception handling.
    pub conditional_catch: bool,
    /// Fold operators over literal operands.
    pub fold_constants: bool,
}

impl IrOptions {
    /// Standard-compliant options: every extension disabled.
    pub fn strict() -> Self {
        Self {
            conditional_catch: false,
            fold_constants: true,
        }
    }

    /// Set whether guarded catch clauses are admitted.
    pub fn with_conditional_catch(mut self, enabled: bool) -> Self {
        self.conditional_catch = enabled;
        self
    }

    /// Set whether constant folding runs.
    pub fn with_fold_constants(mut self, enabled: bool) -> Self {
        self.fold_constants = enabled;
        self
    }
}

impl Default for IrOptions {
    fn default() -> Self {
        Self {
            conditional_catch: cfg!(feature = "conditional-catch"),
            fold_constants: true,
        }
    }
}
