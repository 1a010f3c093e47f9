//! Foundation types for the Patois registration core.
//!
//! This module provides the primitives used throughout the crate:
//! - [`Origin`] - Registration-source labels
//! - [`SyntaxElement`], [`ElementType`], [`ElementFactory`] - Element
//!   identity and instantiation
//! - [`ValueType`] - Runtime value type handles
//!
//! This module has NO dependencies on other patois modules.

mod element;
mod origin;

pub use element::{ElementFactory, ElementType, FactoryError, SyntaxElement, ValueType};
pub use origin::Origin;
