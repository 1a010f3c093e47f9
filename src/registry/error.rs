//! Errors surfaced by descriptor construction and registration.
//!
//! Two families share one enum: configuration errors (the registering
//! addon built or registered a descriptor wrong; caught at build or
//! registration time) and construction errors (an element factory failed
//! at instantiation time). Every variant names the origin and element so
//! a log line identifies the addon at fault.

use thiserror::Error;

use super::descriptor::SyntaxKind;
use crate::base::{FactoryError, Origin};

/// Error type of the registration core.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The builder was created over a bare element type and no factory
    /// was supplied before `build`.
    #[error(
        "cannot build a descriptor for `{element}` (origin `{origin}`): \
         the element type is not constructible and no factory was provided"
    )]
    MissingFactory {
        /// Origin the descriptor would have carried.
        origin: Origin,
        /// Element type name.
        element: &'static str,
    },

    /// No patterns were declared and no explicit factory marks the
    /// element as a fixed instance.
    #[error(
        "cannot build a descriptor for `{element}` (origin `{origin}`): \
         at least one pattern is required unless an explicit factory is provided"
    )]
    MissingPatterns {
        /// Origin the descriptor would have carried.
        origin: Origin,
        /// Element type name.
        element: &'static str,
    },

    /// An expression descriptor declared the unit type as its result.
    #[error(
        "cannot build an expression descriptor for `{element}` (origin `{origin}`): \
         the unit type is not a value type"
    )]
    InvalidReturnType {
        /// Origin the descriptor would have carried.
        origin: Origin,
        /// Element type name.
        element: &'static str,
    },

    /// A structure descriptor that cannot be a block carried an entry
    /// validator.
    #[error(
        "cannot build a structure descriptor for `{element}` (origin `{origin}`): \
         only block-shaped structures may carry an entry validator"
    )]
    ValidatorOnLineShape {
        /// Origin the descriptor would have carried.
        origin: Origin,
        /// Element type name.
        element: &'static str,
    },

    /// A descriptor was registered under a kind its payload does not
    /// belong to.
    #[error(
        "cannot register `{element}` (origin `{origin}`) under the {kind} registry: \
         its payload belongs to a different kind"
    )]
    KindMismatch {
        /// The kind registration was attempted under.
        kind: SyntaxKind,
        /// The descriptor's origin.
        origin: Origin,
        /// Element type name.
        element: &'static str,
    },

    /// The element factory failed. The descriptor stays registered; the
    /// failure is the addon author's to investigate.
    #[error("failed to instantiate `{element}` (origin `{origin}`)")]
    Construction {
        /// The descriptor's origin.
        origin: Origin,
        /// Element type name.
        element: &'static str,
        /// The factory's failure.
        #[source]
        source: FactoryError,
    },
}

impl RegistryError {
    /// Whether this is a configuration mistake by the registering addon,
    /// as opposed to a failure while instantiating an element.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, RegistryError::Construction { .. })
    }
}
