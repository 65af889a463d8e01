//! Arena allocation for IR nodes.
//!
//! Every node of a compilation unit lives in one [`bumpalo::Bump`]. Nodes
//! refer to their children with plain `&'ir` references, so an unchanged
//! child can be shared between the old and the rewritten parent at no cost.
//! Nodes that a rewrite replaces stay allocated until the arena is dropped
//! together with its unit.

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;

use crate::error::IrResult;

/// A copyable handle to the arena a tree is allocated in.
#[derive(Clone, Copy)]
pub struct IrArena<'ir> {
    bump: &'ir Bump,
}

impl<'ir> IrArena<'ir> {
    /// Wrap a bump allocator.
    pub fn new(bump: &'ir Bump) -> Self {
        Self { bump }
    }

    /// The underlying allocator.
    #[inline]
    pub fn bump(self) -> &'ir Bump {
        self.bump
    }

    /// Move `value` into the arena.
    #[inline]
    pub fn alloc<T>(self, value: T) -> &'ir T {
        self.bump.alloc(value)
    }

    /// Copy a string into the arena.
    #[inline]
    pub fn alloc_str(self, value: &str) -> &'ir str {
        self.bump.alloc_str(value)
    }

    /// Copy a slice into the arena.
    #[inline]
    pub fn alloc_slice<T: Copy>(self, items: &[T]) -> &'ir [T] {
        self.bump.alloc_slice_copy(items)
    }

    /// Total bytes handed out by the arena so far.
    pub fn allocated_bytes(self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Map `f` over `items`, sharing the input slice when nothing changed.
    ///
    /// `same` decides whether a mapped item is identical to its input. A new
    /// slice is allocated only once the first item differs, so a traversal
    /// that rewrites nothing allocates nothing.
    pub fn map_shared<T, F, S>(self, items: &'ir [T], mut f: F, same: S) -> IrResult<&'ir [T]>
    where
        T: Copy,
        F: FnMut(T) -> IrResult<T>,
        S: Fn(T, T) -> bool,
    {
        let mut changed: Option<BumpVec<'ir, T>> = None;

        for (i, &item) in items.iter().enumerate() {
            let mapped = f(item)?;
            match changed.as_mut() {
                Some(out) => out.push(mapped),
                None if !same(item, mapped) => {
                    let mut out = BumpVec::with_capacity_in(items.len(), self.bump);
                    out.extend_from_slice(&items[..i]);
                    out.push(mapped);
                    changed = Some(out);
                }
                None => {}
            }
        }

        Ok(match changed {
            Some(out) => out.into_bump_slice(),
            None => items,
        })
    }
}

impl std::fmt::Debug for IrArena<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrArena")
            .field("allocated_bytes", &self.bump.allocated_bytes())
            .finish()
    }
}
