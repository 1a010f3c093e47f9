//! Partial-order priorities for syntax candidate ordering.
//!
//! Addons register syntax elements independently and cannot see each
//! other's registrations, so nobody can assign a global rank. Instead an
//! addon declares *relative* constraints: "mine sorts before that one".
//! [`Priority`] is the node type of the resulting partial order, and
//! [`Priority::compare`] is the pairwise relation the registry sorts by.
//!
//! A priority's identity is the node itself: two separately created
//! priorities are never equal, even when their neighbor sets coincide.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A node in the registration priority partial order.
///
/// Holds the set of priorities this one must sort *before* and the set it
/// must sort *after*. Both sets are fixed at construction. Cloning shares
/// the node; equality and hashing are by node identity, never by
/// contents.
#[derive(Clone)]
pub struct Priority {
    inner: Arc<Node>,
}

struct Node {
    before: Vec<Priority>,
    after: Vec<Priority>,
}

impl Priority {
    /// A priority with no declared constraints.
    ///
    /// Sorts as a tie against everything; the registry resolves such
    /// ties by registration order.
    pub fn base() -> Self {
        Self {
            inner: Arc::new(Node {
                before: Vec::new(),
                after: Vec::new(),
            }),
        }
    }

    /// A priority constrained to sort before `other`.
    ///
    /// The new node's before-set is `{other}` plus everything `other` is
    /// already known to be before; its after-set is inherited from
    /// `other` unchanged. Folding the neighbor's sets here is what lets
    /// [`compare`](Self::compare) stop at one hop.
    pub fn before(other: &Priority) -> Self {
        let mut before = Vec::with_capacity(other.inner.before.len() + 1);
        before.push(other.clone());
        before.extend(other.inner.before.iter().cloned());
        Self {
            inner: Arc::new(Node {
                before,
                after: other.inner.after.clone(),
            }),
        }
    }

    /// A priority constrained to sort after `other`.
    pub fn after(other: &Priority) -> Self {
        let mut after = Vec::with_capacity(other.inner.after.len() + 1);
        after.push(other.clone());
        after.extend(other.inner.after.iter().cloned());
        Self {
            inner: Arc::new(Node {
                before: other.inner.before.clone(),
                after,
            }),
        }
    }

    /// The priorities this one must sort before.
    pub fn before_set(&self) -> &[Priority] {
        &self.inner.before
    }

    /// The priorities this one must sort after.
    pub fn after_set(&self) -> &[Priority] {
        &self.inner.after
    }

    /// Compare two priorities for sorting.
    ///
    /// `Equal` covers both "same node" and "no known constraint": the
    /// caller must break such ties with a stable secondary key (the
    /// registry uses registration order). A direct relation wins over one
    /// found through a shared neighbor, so contradictory declarations
    /// resolve deterministically and silently.
    ///
    /// This is a partial order, not a total one: it is unfit for
    /// `slice::sort_by` and friends, which assume total orders.
    pub fn compare(&self, other: &Priority) -> Ordering {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return Ordering::Equal;
        }

        if contains(self.before_set(), other) || contains(other.after_set(), self) {
            return Ordering::Less;
        }
        if contains(self.after_set(), other) || contains(other.before_set(), self) {
            return Ordering::Greater;
        }

        // One hop through a shared neighbor. Construction folds each
        // parent's sets into its children, so these are the fully closed
        // sets and no deeper traversal is needed.
        if self
            .before_set()
            .iter()
            .any(|p| contains(other.after_set(), p))
        {
            return Ordering::Less;
        }
        if self
            .after_set()
            .iter()
            .any(|p| contains(other.before_set(), p))
        {
            return Ordering::Greater;
        }

        Ordering::Equal
    }
}

fn contains(set: &[Priority], priority: &Priority) -> bool {
    set.iter().any(|p| p == priority)
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Priority {}

impl Hash for Priority {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.inner) as usize).hash(state);
    }
}

impl fmt::Debug for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Priority")
            .field("before", &self.inner.before.len())
            .field("after", &self.inner.after.len())
            .finish()
    }
}
