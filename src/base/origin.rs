//! Origin labels for tracking who registered a syntax element.

use std::fmt;

use smol_str::SmolStr;

use super::ElementType;

/// A label identifying the source of a registration.
///
/// Every descriptor carries the `Origin` of the addon that registered it.
/// Origins are what diagnostics print and what bulk unregistration matches
/// on when an addon is unloaded.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Origin(SmolStr);

impl Origin {
    /// Create an origin from a source name.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    /// The default origin for a descriptor that never set one: the
    /// element's type name.
    pub fn of_element(element: ElementType) -> Self {
        Self(SmolStr::new_static(element.name()))
    }

    /// Get the source name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Origin({:?})", self.0)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Origin {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
