//! Syntax registration — descriptors, builders, and the registry.
//!
//! Addons describe each syntax element they contribute as a
//! [`SyntaxDescriptor`] (what it is, what patterns it matches, how to
//! instantiate it, where it sorts) and hand it to the shared
//! [`SyntaxRegistry`]. The matching algorithm asks the registry for the
//! [`ordered_view`](SyntaxRegistry::ordered_view) of a kind and tries
//! the candidates in that order.

mod builder;
mod descriptor;
mod error;
mod store;

pub use builder::{DescriptorBuilder, ExpressionBuilder, StructureBuilder};
pub use descriptor::{DescriptorData, NodeShape, SyntaxDescriptor, SyntaxKind};
pub use error::RegistryError;
pub use store::SyntaxRegistry;
