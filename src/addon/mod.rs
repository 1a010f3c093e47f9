//! Addon handles — named registration sources.
//!
//! The runtime hands every loaded addon an [`Addon`] bound to the shared
//! registry. The handle supplies the [`Origin`] the addon's descriptors
//! should carry, forwards registration, and tears everything down again
//! when the addon is unloaded.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::Origin;
use crate::registry::{RegistryError, SyntaxDescriptor, SyntaxKind, SyntaxRegistry};

/// A named source of syntax registrations.
#[derive(Clone)]
pub struct Addon {
    name: SmolStr,
    registry: Arc<SyntaxRegistry>,
}

impl Addon {
    /// Create a handle for a named addon over a shared registry.
    pub fn new(name: impl Into<SmolStr>, registry: Arc<SyntaxRegistry>) -> Self {
        Self {
            name: name.into(),
            registry,
        }
    }

    /// The addon's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The origin every descriptor from this addon should carry.
    pub fn origin(&self) -> Origin {
        Origin::new(self.name.clone())
    }

    /// The registry this addon registers into.
    pub fn registry(&self) -> &Arc<SyntaxRegistry> {
        &self.registry
    }

    /// Register a descriptor under a kind.
    pub fn register(
        &self,
        kind: SyntaxKind,
        descriptor: SyntaxDescriptor,
    ) -> Result<(), RegistryError> {
        self.registry.register(kind, descriptor)
    }

    /// Remove everything this addon registered; called on unload.
    pub fn unregister(&self) {
        self.registry.unregister_all(&self.origin());
    }
}

impl fmt::Debug for Addon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addon({:?})", self.name)
    }
}
