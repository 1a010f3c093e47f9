//! Immutable registration records for syntax elements.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use super::error::RegistryError;
use crate::base::{ElementFactory, ElementType, Origin, SyntaxElement, ValueType};
use crate::entry::EntryValidator;
use crate::priority::Priority;

/// The registries a descriptor may be registered under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Top-level script constructs (events, commands, option blocks).
    Structure,
    /// Statements that open an indented body.
    Section,
    /// Plain statements.
    Effect,
    /// Boolean-valued conditions.
    Condition,
    /// Value-producing expressions.
    Expression,
}

impl SyntaxKind {
    /// The stable lowercase label used in logs and error text.
    pub const fn label(self) -> &'static str {
        match self {
            SyntaxKind::Structure => "structure",
            SyntaxKind::Section => "section",
            SyntaxKind::Effect => "effect",
            SyntaxKind::Condition => "condition",
            SyntaxKind::Expression => "expression",
        }
    }

    /// Whether a descriptor payload belongs under this kind.
    pub(crate) fn accepts(self, data: &DescriptorData) -> bool {
        matches!(
            (self, data),
            (SyntaxKind::Expression, DescriptorData::Expression { .. })
                | (SyntaxKind::Structure, DescriptorData::Structure { .. })
                | (
                    SyntaxKind::Section | SyntaxKind::Effect | SyntaxKind::Condition,
                    DescriptorData::Plain,
                )
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The node shape a structural element occupies in a script.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeShape {
    /// A single line; cannot open a block.
    Line,
    /// Must open a block of entries or statements.
    Block,
    /// Either form is accepted.
    Any,
}

impl NodeShape {
    /// Whether this shape can appear as a block.
    pub const fn allows_block(self) -> bool {
        !matches!(self, NodeShape::Line)
    }
}

/// Kind-specific payload of a descriptor.
///
/// A closed set of variants keeps ordering and storage kind-agnostic
/// while each builder enforces its own validation.
#[derive(Clone, Debug, PartialEq)]
pub enum DescriptorData {
    /// Statements, conditions, and sections carry nothing extra.
    Plain,
    /// Expressions declare the type of value they produce.
    Expression {
        /// The runtime value type this expression yields.
        return_type: ValueType,
    },
    /// Structures declare their node shape and, for blocks, what
    /// entries they accept.
    Structure {
        /// Validation applied to the block's entries, if any.
        entry_validator: Option<EntryValidator>,
        /// Whether the structure is a block, a line, or either.
        shape: NodeShape,
    },
}

/// An immutable record describing one registrable syntax element.
///
/// Built by the builders in this module, stored by the registry, and
/// consumed by the matching algorithm through
/// [`ordered_view`](super::SyntaxRegistry::ordered_view). Cloning is
/// cheap; the pattern list and factory are shared.
#[derive(Clone)]
pub struct SyntaxDescriptor {
    origin: Origin,
    element: ElementType,
    factory: ElementFactory,
    patterns: Arc<[SmolStr]>,
    priority: Priority,
    data: DescriptorData,
}

impl SyntaxDescriptor {
    pub(super) fn new(
        origin: Origin,
        element: ElementType,
        factory: ElementFactory,
        patterns: Arc<[SmolStr]>,
        priority: Priority,
        data: DescriptorData,
    ) -> Self {
        Self {
            origin,
            element,
            factory,
            patterns,
            priority,
            data,
        }
    }

    /// The source that registered this element.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// The element's type identity.
    pub fn element(&self) -> ElementType {
        self.element
    }

    /// The patterns this element matches, in declaration order.
    pub fn patterns(&self) -> &[SmolStr] {
        &self.patterns
    }

    /// The element's registration priority.
    pub fn priority(&self) -> &Priority {
        &self.priority
    }

    /// The kind-specific payload.
    pub fn data(&self) -> &DescriptorData {
        &self.data
    }

    /// Produce a fresh instance of the element.
    ///
    /// Failure is a construction error carrying the descriptor's origin
    /// and element identity; the descriptor stays registered regardless.
    pub fn instantiate(&self) -> Result<Box<dyn SyntaxElement>, RegistryError> {
        self.factory
            .produce()
            .map_err(|source| RegistryError::Construction {
                origin: self.origin.clone(),
                element: self.element.name(),
                source,
            })
    }
}

impl PartialEq for SyntaxDescriptor {
    /// Identity is origin, element type, and patterns. Priority and the
    /// kind payload affect ordering and behavior, not which stored entry
    /// a re-registration replaces.
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.element == other.element
            && self.patterns == other.patterns
    }
}

impl Eq for SyntaxDescriptor {}

impl fmt::Debug for SyntaxDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxDescriptor")
            .field("origin", &self.origin)
            .field("element", &self.element)
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}
