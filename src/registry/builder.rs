//! Fluent builders producing immutable syntax descriptors.
//!
//! One builder per descriptor kind: [`DescriptorBuilder`] for plain
//! elements (effects, conditions, sections), [`ExpressionBuilder`] for
//! value-producing elements, [`StructureBuilder`] for top-level
//! constructs. All three validate their invariants in `build` and return
//! a configuration error instead of a half-formed descriptor.
//!
//! `build` borrows the builder, so one builder can produce several
//! descriptors from the same accumulated state.

use std::sync::Arc;

use smol_str::SmolStr;

use super::descriptor::{DescriptorData, NodeShape, SyntaxDescriptor};
use super::error::RegistryError;
use crate::base::{ElementFactory, ElementType, Origin, SyntaxElement, ValueType};
use crate::entry::EntryValidator;
use crate::priority::Priority;

/// State shared by every builder kind.
#[derive(Debug)]
struct BuilderCore {
    element: ElementType,
    origin: Origin,
    factory: Option<ElementFactory>,
    explicit_factory: bool,
    patterns: Vec<SmolStr>,
    priority: Priority,
}

impl BuilderCore {
    fn new(element: ElementType, factory: Option<ElementFactory>) -> Self {
        Self {
            element,
            origin: Origin::of_element(element),
            factory,
            explicit_factory: false,
            patterns: Vec::new(),
            priority: Priority::base(),
        }
    }

    fn set_factory(&mut self, factory: ElementFactory) {
        self.factory = Some(factory);
        self.explicit_factory = true;
    }

    fn validate(&self) -> Result<ElementFactory, RegistryError> {
        let Some(factory) = self.factory.clone() else {
            return Err(RegistryError::MissingFactory {
                origin: self.origin.clone(),
                element: self.element.name(),
            });
        };
        // patternless registration is reserved for fixed-instance
        // elements, which are recognizable by their explicit factory
        if self.patterns.is_empty() && !self.explicit_factory {
            return Err(RegistryError::MissingPatterns {
                origin: self.origin.clone(),
                element: self.element.name(),
            });
        }
        Ok(factory)
    }

    fn patterns_arc(&self) -> Arc<[SmolStr]> {
        self.patterns.clone().into()
    }
}

macro_rules! common_setters {
    () => {
        /// Replace the origin label (defaults to the element type name).
        pub fn origin(mut self, origin: Origin) -> Self {
            self.core.origin = origin;
            self
        }

        /// Supply an explicit element factory.
        pub fn factory(mut self, factory: ElementFactory) -> Self {
            self.core.set_factory(factory);
            self
        }

        /// Append one pattern.
        pub fn pattern(mut self, pattern: impl Into<SmolStr>) -> Self {
            self.core.patterns.push(pattern.into());
            self
        }

        /// Append several patterns, preserving their order.
        pub fn patterns<I>(mut self, patterns: I) -> Self
        where
            I: IntoIterator,
            I::Item: Into<SmolStr>,
        {
            self.core
                .patterns
                .extend(patterns.into_iter().map(Into::into));
            self
        }

        /// Replace the priority (defaults to [`Priority::base`]).
        pub fn priority(mut self, priority: Priority) -> Self {
            self.core.priority = priority;
            self
        }
    };
}

/// Builder for plain syntax descriptors.
#[derive(Debug)]
pub struct DescriptorBuilder {
    core: BuilderCore,
}

impl DescriptorBuilder {
    /// Builder for a default-constructible element; the factory is
    /// synthesized from [`Default`].
    pub fn new<T: SyntaxElement + Default>() -> Self {
        Self {
            core: BuilderCore::new(ElementType::of::<T>(), Some(ElementFactory::from_default::<T>())),
        }
    }

    /// Builder over a bare element type. No factory can be synthesized;
    /// one must be supplied before `build` succeeds.
    pub fn for_element(element: ElementType) -> Self {
        Self {
            core: BuilderCore::new(element, None),
        }
    }

    common_setters!();

    /// Validate and produce the descriptor.
    pub fn build(&self) -> Result<SyntaxDescriptor, RegistryError> {
        let factory = self.core.validate()?;
        Ok(SyntaxDescriptor::new(
            self.core.origin.clone(),
            self.core.element,
            factory,
            self.core.patterns_arc(),
            self.core.priority.clone(),
            DescriptorData::Plain,
        ))
    }
}

/// Builder for expression descriptors.
///
/// Captures the declared return type up front; everything else follows
/// [`DescriptorBuilder`].
#[derive(Debug)]
pub struct ExpressionBuilder {
    core: BuilderCore,
    return_type: ValueType,
}

impl ExpressionBuilder {
    /// Builder for a default-constructible expression element returning
    /// values of type `R`.
    pub fn new<T: SyntaxElement + Default, R: 'static>() -> Self {
        Self {
            core: BuilderCore::new(ElementType::of::<T>(), Some(ElementFactory::from_default::<T>())),
            return_type: ValueType::of::<R>(),
        }
    }

    /// Builder over a bare element type with an explicit return type.
    pub fn for_element(element: ElementType, return_type: ValueType) -> Self {
        Self {
            core: BuilderCore::new(element, None),
            return_type,
        }
    }

    common_setters!();

    /// Validate and produce the descriptor.
    pub fn build(&self) -> Result<SyntaxDescriptor, RegistryError> {
        if self.return_type.is_unit() {
            return Err(RegistryError::InvalidReturnType {
                origin: self.core.origin.clone(),
                element: self.core.element.name(),
            });
        }
        let factory = self.core.validate()?;
        Ok(SyntaxDescriptor::new(
            self.core.origin.clone(),
            self.core.element,
            factory,
            self.core.patterns_arc(),
            self.core.priority.clone(),
            DescriptorData::Expression {
                return_type: self.return_type,
            },
        ))
    }
}

/// Builder for structure descriptors.
#[derive(Debug)]
pub struct StructureBuilder {
    core: BuilderCore,
    entry_validator: Option<EntryValidator>,
    shape: NodeShape,
}

impl StructureBuilder {
    /// Builder for a default-constructible structure element. The shape
    /// defaults to [`NodeShape::Block`].
    pub fn new<T: SyntaxElement + Default>() -> Self {
        Self {
            core: BuilderCore::new(ElementType::of::<T>(), Some(ElementFactory::from_default::<T>())),
            entry_validator: None,
            shape: NodeShape::Block,
        }
    }

    /// Builder over a bare element type.
    pub fn for_element(element: ElementType) -> Self {
        Self {
            core: BuilderCore::new(element, None),
            entry_validator: None,
            shape: NodeShape::Block,
        }
    }

    common_setters!();

    /// Attach an entry validator. Only valid for shapes that can be a
    /// block.
    pub fn entry_validator(mut self, validator: EntryValidator) -> Self {
        self.entry_validator = Some(validator);
        self
    }

    /// Replace the node shape.
    pub fn shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }

    /// Validate and produce the descriptor.
    pub fn build(&self) -> Result<SyntaxDescriptor, RegistryError> {
        if !self.shape.allows_block() && self.entry_validator.is_some() {
            return Err(RegistryError::ValidatorOnLineShape {
                origin: self.core.origin.clone(),
                element: self.core.element.name(),
            });
        }
        let factory = self.core.validate()?;
        Ok(SyntaxDescriptor::new(
            self.core.origin.clone(),
            self.core.element,
            factory,
            self.core.patterns_arc(),
            self.core.priority.clone(),
            DescriptorData::Structure {
                entry_validator: self.entry_validator.clone(),
                shape: self.shape,
            },
        ))
    }
}
