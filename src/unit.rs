//! Compilation unit.
//!
//! A [`Unit`] owns the sources of one compilation and the arena every IR
//! node built from them is allocated in. Trees borrow from the unit, so a
//! unit outlives every node it hands out; resetting or dropping the unit
//! frees all of them at once.
//!
//! # Example
//!
//! ```
//! use corvid::{Node, Unit};
//!
//! let mut unit = Unit::new();
//! unit.add_source("main.js", "try {} catch (e) {}")?;
//!
//! let b = unit.builder("main.js")?;
//! let clause = b.catch(b.ident("e"), None, b.block(&[]));
//! let root = Node::Try(b.try_(b.block(&[]), &[clause], None));
//!
//! let output = unit.run_passes(root)?;
//! assert_eq!(output.root.to_string(), "try {} catch (e) {}");
//! # Ok::<(), corvid::CorvidError>(())
//! ```

use bumpalo::Bump;
use corvid_core::Source;
use corvid_ir::{IrArena, IrBuilder, IrOptions, Node, PipelineOutput, run_pipeline};
use rustc_hash::FxHashMap;

use crate::error::{CorvidError, Result};

/// Sources plus the arena their IR lives in.
pub struct Unit {
    options: IrOptions,

    /// Sources in registration order.
    sources: Vec<Source>,

    /// Source name to index in `sources`.
    by_name: FxHashMap<String, usize>,

    /// Memory arena for IR allocation.
    arena: Bump,
}

impl Default for Unit {
    fn default() -> Self {
        Self::new()
    }
}

impl Unit {
    /// Create an empty unit with default options.
    pub fn new() -> Self {
        Self::with_options(IrOptions::default())
    }

    pub fn with_options(options: IrOptions) -> Self {
        Self {
            options,
            sources: Vec::new(),
            by_name: FxHashMap::default(),
            arena: Bump::new(),
        }
    }

    pub fn options(&self) -> IrOptions {
        self.options
    }

    /// Register a source. Names must be unique within the unit.
    pub fn add_source(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(CorvidError::DuplicateSource(name));
        }

        self.by_name.insert(name.clone(), self.sources.len());
        self.sources.push(Source::new(name, content));
        Ok(())
    }

    pub fn source(&self, name: &str) -> Option<&Source> {
        self.by_name.get(name).map(|&index| &self.sources[index])
    }

    pub fn sources(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn arena(&self) -> IrArena<'_> {
        IrArena::new(&self.arena)
    }

    /// A builder allocating into this unit's arena against the named source.
    pub fn builder(&self, name: &str) -> Result<IrBuilder<'_>> {
        let source = self
            .source(name)
            .ok_or_else(|| CorvidError::UnknownSource(name.to_string()))?;
        Ok(IrBuilder::new(self.arena(), source))
    }

    /// Run the pass pipeline over a tree built in this unit.
    ///
    /// Returns [`CorvidError::Rejected`] if a checking pass reported errors.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run_passes<'u>(&'u self, root: Node<'u>) -> Result<PipelineOutput<'u>> {
        let output = run_pipeline(self.arena(), root, self.options)?;
        if output.diagnostics.has_errors() {
            return Err(CorvidError::Rejected(output.diagnostics));
        }
        Ok(output)
    }

    /// Bytes currently allocated for IR nodes.
    pub fn allocated_bytes(&self) -> usize {
        self.arena.allocated_bytes()
    }

    /// Free every node built so far. Sources are kept.
    pub fn reset(&mut self) {
        self.arena.reset();
    }
}
