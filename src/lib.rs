//! # patois-base
//!
//! Syntax registration core for the Patois scripting runtime.
//!
//! Addons contribute *syntax elements* (units that parse one textual
//! pattern into a runtime construct) without seeing each other's
//! registrations. This crate stores each element's identity, patterns,
//! and constructor, and computes the deterministic order in which the
//! matching algorithm tries candidates, from nothing but the *relative*
//! ordering constraints addons declare.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! addon    → addon handles (named sources over a shared registry)
//!   ↓
//! registry → descriptors, builders, ordering, storage
//!   ↓
//! priority → partial-order priorities      entry → entry validation
//!   ↓
//! base     → primitives (Origin, element identity, factories)
//! ```
//!
//! The matching algorithm itself, the runtime value model, and addon
//! discovery/loading live elsewhere; this crate meets them at the
//! [`SyntaxElement`] trait and the
//! [`ordered_view`](registry::SyntaxRegistry::ordered_view) query.

/// Addon handles: named registration sources
pub mod addon;

/// Foundation types: Origin, element identity, factories
pub mod base;

/// Entry validation for block-shaped elements
pub mod entry;

/// Partial-order priorities and their comparison
pub mod priority;

/// Descriptors, builders, and the registry
pub mod registry;

// Re-export commonly needed items
pub use addon::Addon;
pub use base::{ElementFactory, ElementType, FactoryError, Origin, SyntaxElement, ValueType};
pub use entry::{EntryCheckError, EntryValidator, EntryValidatorBuilder, UnknownEntryPolicy};
pub use priority::Priority;
pub use registry::{
    DescriptorBuilder, DescriptorData, ExpressionBuilder, NodeShape, RegistryError,
    StructureBuilder, SyntaxDescriptor, SyntaxKind, SyntaxRegistry,
};
