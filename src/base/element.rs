//! Element identity and instantiation.

use std::any::{self, TypeId};
use std::fmt;
use std::sync::Arc;

/// A runtime construct produced by parsing a syntax pattern.
///
/// This is the boundary to the matching algorithm: the registry stores
/// descriptors that know how to produce elements, and the matcher drives
/// the elements it instantiates. Implementations live in addons and in
/// the runtime's built-in element collections, not in this crate.
pub trait SyntaxElement: Send + Sync + 'static {}

/// Error produced by an [`ElementFactory`].
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

/// The type identity of a syntax element implementation.
///
/// A lightweight handle pairing a [`TypeId`] with the type's name. Cheap
/// to copy and hash; the name is only used for diagnostics and default
/// origin labels.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ElementType {
    id: TypeId,
    name: &'static str,
}

impl ElementType {
    /// The identity of `T`.
    ///
    /// `T` may be unsized (e.g. a trait object type), in which case a
    /// factory must be supplied explicitly when building a descriptor.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Get the raw type id.
    #[inline]
    pub fn id(self) -> TypeId {
        self.id
    }

    /// Get the type name.
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementType({})", self.name)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The type identity of a runtime value, as declared by expression
/// descriptors for their results.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// The identity of the value type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Get the raw type id.
    #[inline]
    pub fn id(self) -> TypeId {
        self.id
    }

    /// Get the type name.
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// The unit type declares "no value" and is rejected as an
    /// expression return type at descriptor build time.
    pub(crate) fn is_unit(self) -> bool {
        self.id == TypeId::of::<()>()
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueType({})", self.name)
    }
}

/// A shared, fallible constructor for a syntax element.
///
/// Descriptors always hold one of these: either supplied by the
/// registering addon, or synthesized from [`Default`] by the builder.
/// The factory is invoked once per parse attempt that selects the
/// element, so it must be cheap and reentrant.
#[derive(Clone)]
pub struct ElementFactory {
    make: Arc<dyn Fn() -> Result<Box<dyn SyntaxElement>, FactoryError> + Send + Sync>,
}

impl ElementFactory {
    /// Wrap an explicit constructor closure.
    pub fn new<F>(make: F) -> Self
    where
        F: Fn() -> Result<Box<dyn SyntaxElement>, FactoryError> + Send + Sync + 'static,
    {
        Self {
            make: Arc::new(make),
        }
    }

    /// The synthesized factory for a default-constructible element.
    pub fn from_default<T: SyntaxElement + Default>() -> Self {
        Self::new(|| Ok(Box::new(T::default())))
    }

    /// Produce a fresh element instance.
    pub fn produce(&self) -> Result<Box<dyn SyntaxElement>, FactoryError> {
        (self.make)()
    }
}

impl fmt::Debug for ElementFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ElementFactory(..)")
    }
}
