//! The process-wide syntax registry.
//!
//! One registry instance is shared (behind an `Arc`) by every addon and
//! by the matching algorithm. Registration is expected mostly during
//! single-threaded startup, but hot-reloaded addons may register at any
//! time, so all state lives behind a lock and ordered views are handed
//! out as immutable shared slices.

use std::cmp::Ordering;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use super::descriptor::{SyntaxDescriptor, SyntaxKind};
use super::error::RegistryError;
use crate::base::Origin;

type KindMap = IndexMap<SyntaxKind, Shelf, FxBuildHasher>;

/// Storage for one kind: the registration-ordered entries plus the
/// cached ordered view, invalidated by any write to this kind.
#[derive(Default)]
struct Shelf {
    entries: Vec<SyntaxDescriptor>,
    ordered: Option<Arc<[SyntaxDescriptor]>>,
}

/// The collection of registered syntax descriptors, grouped by kind.
#[derive(Default)]
pub struct SyntaxRegistry {
    shelves: RwLock<KindMap>,
}

impl SyntaxRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under a kind.
    ///
    /// If an equal descriptor (same origin, element, and patterns) is
    /// already stored, the new one replaces it in place, keeping the
    /// original registration position: re-registering after a reload
    /// neither grows the shelf nor forfeits the tie-break slot.
    ///
    /// Fails only if the payload does not belong under `kind`.
    pub fn register(
        &self,
        kind: SyntaxKind,
        descriptor: SyntaxDescriptor,
    ) -> Result<(), RegistryError> {
        if !kind.accepts(descriptor.data()) {
            return Err(RegistryError::KindMismatch {
                kind,
                origin: descriptor.origin().clone(),
                element: descriptor.element().name(),
            });
        }

        let mut shelves = self.shelves.write();
        let shelf = shelves.entry(kind).or_default();
        match shelf
            .entries
            .iter_mut()
            .find(|existing| **existing == descriptor)
        {
            Some(existing) => {
                debug!(
                    kind = %kind,
                    origin = %descriptor.origin(),
                    element = descriptor.element().name(),
                    "replacing registered syntax"
                );
                *existing = descriptor;
            }
            None => {
                debug!(
                    kind = %kind,
                    origin = %descriptor.origin(),
                    element = descriptor.element().name(),
                    "registering syntax"
                );
                shelf.entries.push(descriptor);
            }
        }
        shelf.ordered = None;
        Ok(())
    }

    /// The descriptors of one kind, ordered by priority with
    /// registration order breaking ties.
    ///
    /// The returned slice is immutable and safe to hold across later
    /// registrations; repeated calls with no intervening writes to this
    /// kind return the same cached slice.
    pub fn ordered_view(&self, kind: SyntaxKind) -> Arc<[SyntaxDescriptor]> {
        {
            let shelves = self.shelves.read();
            match shelves.get(&kind) {
                Some(shelf) => {
                    if let Some(ordered) = &shelf.ordered {
                        return Arc::clone(ordered);
                    }
                }
                None => return Arc::from(Vec::new()),
            }
        }

        // Slow path: sort under the write lock, re-checking the cache in
        // case another thread filled it between the locks.
        let mut shelves = self.shelves.write();
        let Some(shelf) = shelves.get_mut(&kind) else {
            return Arc::from(Vec::new());
        };
        if let Some(ordered) = &shelf.ordered {
            return Arc::clone(ordered);
        }

        trace!(kind = %kind, entries = shelf.entries.len(), "sorting syntax candidates");
        let ordered: Arc<[SyntaxDescriptor]> = sort_candidates(&shelf.entries).into();
        shelf.ordered = Some(Arc::clone(&ordered));
        ordered
    }

    /// Remove every descriptor registered under `origin`, across all
    /// kinds. Survivors keep their relative order. Removing nothing is
    /// not an error.
    pub fn unregister_all(&self, origin: &Origin) {
        let mut shelves = self.shelves.write();
        let mut removed = 0usize;
        for shelf in shelves.values_mut() {
            let before = shelf.entries.len();
            shelf.entries.retain(|d| d.origin() != origin);
            if shelf.entries.len() != before {
                removed += before - shelf.entries.len();
                shelf.ordered = None;
            }
        }
        if removed > 0 {
            debug!(origin = %origin, removed, "unregistered syntax");
        }
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.shelves.write().clear();
    }

    /// The number of descriptors registered under a kind.
    pub fn len(&self, kind: SyntaxKind) -> usize {
        self.shelves
            .read()
            .get(&kind)
            .map_or(0, |shelf| shelf.entries.len())
    }

    /// Whether no descriptor is registered under any kind.
    pub fn is_empty(&self) -> bool {
        self.shelves
            .read()
            .values()
            .all(|shelf| shelf.entries.is_empty())
    }
}

/// Stable ordering pass over one shelf.
///
/// Priority comparison is a partial order: unrelated entries compare
/// `Equal` without being interchangeable with each other's neighbors,
/// which violates the total-order contract of `slice::sort_by`. Instead,
/// constraints are resolved pairwise and on demand: each round emits the
/// first remaining entry (in registration order) that no other remaining
/// entry must precede. Unconstrained entries therefore come out in exact
/// registration order, and every constraint visible to
/// [`Priority::compare`](crate::priority::Priority::compare) is honored.
fn sort_candidates(entries: &[SyntaxDescriptor]) -> Vec<SyntaxDescriptor> {
    let mut remaining: Vec<&SyntaxDescriptor> = entries.iter().collect();
    let mut out = Vec::with_capacity(entries.len());

    while !remaining.is_empty() {
        let emittable = remaining.iter().position(|candidate| {
            remaining
                .iter()
                .all(|other| candidate.priority().compare(other.priority()) != Ordering::Greater)
        });
        // contradictory declarations can leave every entry blocked;
        // fall back to registration order
        let index = emittable.unwrap_or(0);
        out.push(remaining.remove(index).clone());
    }

    out
}
