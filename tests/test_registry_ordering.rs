//! End-to-end registration and ordering scenarios.
//!
//! Exercises the public surface the way the runtime and its addons do:
//! builders produce descriptors, addon handles register them into one
//! shared registry, and the matching side consumes ordered views.

use std::sync::Arc;

use rstest::rstest;

use patois::{
    Addon, DescriptorBuilder, DescriptorData, ElementType, EntryValidator, ExpressionBuilder,
    NodeShape, Origin, Priority, RegistryError, StructureBuilder, SyntaxDescriptor, SyntaxElement,
    SyntaxKind, SyntaxRegistry, ValueType,
};

#[derive(Default)]
struct Greet;
impl SyntaxElement for Greet {}

#[derive(Default)]
struct LoudGreet;
impl SyntaxElement for LoudGreet {}

#[derive(Default)]
struct Farewell;
impl SyntaxElement for Farewell {}

#[derive(Default)]
struct CommandBlock;
impl SyntaxElement for CommandBlock {}

fn origins(view: &[SyntaxDescriptor]) -> Vec<&str> {
    view.iter().map(|d| d.origin().name()).collect()
}

#[test]
fn test_greeting_pipeline_orders_across_addons() {
    let registry = Arc::new(SyntaxRegistry::new());
    let addon_a = Addon::new("AddonA", Arc::clone(&registry));
    let addon_b = Addon::new("AddonB", Arc::clone(&registry));
    let addon_c = Addon::new("AddonC", Arc::clone(&registry));

    // Addon A registers a greeting with no particular priority.
    let greet_priority = Priority::base();
    addon_a
        .register(
            SyntaxKind::Effect,
            DescriptorBuilder::new::<Greet>()
                .origin(addon_a.origin())
                .pattern("hello")
                .priority(greet_priority.clone())
                .build()
                .unwrap(),
        )
        .unwrap();

    // Addon B wants its louder variant tried first, without knowing
    // anything about addon A beyond its priority handle.
    addon_b
        .register(
            SyntaxKind::Effect,
            DescriptorBuilder::new::<LoudGreet>()
                .origin(addon_b.origin())
                .pattern("hello")
                .priority(Priority::before(&greet_priority))
                .build()
                .unwrap(),
        )
        .unwrap();

    let view = registry.ordered_view(SyntaxKind::Effect);
    assert_eq!(origins(&view), ["AddonB", "AddonA"]);

    // A registration under a different kind must not disturb the view.
    addon_c
        .register(
            SyntaxKind::Condition,
            DescriptorBuilder::new::<Farewell>()
                .origin(addon_c.origin())
                .pattern("bye")
                .build()
                .unwrap(),
        )
        .unwrap();
    let unchanged = registry.ordered_view(SyntaxKind::Effect);
    assert!(Arc::ptr_eq(&view, &unchanged));

    // Every candidate the matcher would try can actually be produced.
    for descriptor in view.iter() {
        assert!(descriptor.instantiate().is_ok());
    }
}

#[test]
fn test_transitive_constraints_order_strangers() {
    let registry = Arc::new(SyntaxRegistry::new());
    let addon = Addon::new("Addons", Arc::clone(&registry));

    // c is declared before b, b before a; c never references a.
    let a = Priority::base();
    let b = Priority::before(&a);
    let c = Priority::before(&b);

    for (name, priority) in [("a", a), ("b", b), ("c", c)] {
        addon
            .register(
                SyntaxKind::Effect,
                DescriptorBuilder::new::<Greet>()
                    .origin(Origin::new(name))
                    .pattern(name)
                    .priority(priority)
                    .build()
                    .unwrap(),
            )
            .unwrap();
    }

    let view = registry.ordered_view(SyntaxKind::Effect);
    assert_eq!(origins(&view), ["c", "b", "a"]);
}

#[test]
fn test_hot_reload_replaces_in_place() {
    let registry = Arc::new(SyntaxRegistry::new());
    let addon = Addon::new("AddonFoo", Arc::clone(&registry));
    let anchor = Priority::base();

    for pattern in ["one", "two", "three"] {
        addon
            .register(
                SyntaxKind::Effect,
                DescriptorBuilder::new::<Greet>()
                    .origin(Origin::new(pattern))
                    .pattern(pattern)
                    .priority(anchor.clone())
                    .build()
                    .unwrap(),
            )
            .unwrap();
    }

    // The reloaded addon re-registers "two" with a priority that now
    // sorts first; the shelf must not grow.
    addon
        .register(
            SyntaxKind::Effect,
            DescriptorBuilder::new::<Greet>()
                .origin(Origin::new("two"))
                .pattern("two")
                .priority(Priority::before(&anchor))
                .build()
                .unwrap(),
        )
        .unwrap();

    assert_eq!(registry.len(SyntaxKind::Effect), 3);
    let view = registry.ordered_view(SyntaxKind::Effect);
    assert_eq!(origins(&view), ["two", "one", "three"]);
}

#[test]
fn test_addon_unload_leaves_others_in_order() {
    let registry = Arc::new(SyntaxRegistry::new());
    let foo = Addon::new("AddonFoo", Arc::clone(&registry));
    let bar = Addon::new("AddonBar", Arc::clone(&registry));

    for (addon, pattern) in [(&foo, "f1"), (&bar, "b1"), (&foo, "f2"), (&bar, "b2")] {
        addon
            .register(
                SyntaxKind::Effect,
                DescriptorBuilder::new::<Greet>()
                    .origin(addon.origin())
                    .pattern(pattern)
                    .build()
                    .unwrap(),
            )
            .unwrap();
    }

    foo.unregister();

    let view = registry.ordered_view(SyntaxKind::Effect);
    assert_eq!(origins(&view), ["AddonBar", "AddonBar"]);
    let patterns: Vec<&str> = view
        .iter()
        .flat_map(|d| d.patterns().iter().map(|p| p.as_str()))
        .collect();
    assert_eq!(patterns, ["b1", "b2"]);
}

#[test]
fn test_expression_registration_end_to_end() {
    let registry = SyntaxRegistry::new();
    let descriptor = ExpressionBuilder::new::<Greet, String>()
        .origin(Origin::new("AddonA"))
        .pattern("the greeting")
        .build()
        .unwrap();

    registry
        .register(SyntaxKind::Expression, descriptor)
        .unwrap();

    let view = registry.ordered_view(SyntaxKind::Expression);
    match view[0].data() {
        DescriptorData::Expression { return_type } => {
            assert_eq!(*return_type, ValueType::of::<String>());
        }
        other => panic!("expected expression payload, got {other:?}"),
    }
}

#[test]
fn test_structure_registration_end_to_end() {
    let registry = SyntaxRegistry::new();
    let descriptor = StructureBuilder::new::<CommandBlock>()
        .origin(Origin::new("AddonA"))
        .pattern("command <command>")
        .entry_validator(
            EntryValidator::builder()
                .required("trigger")
                .optional("aliases")
                .build(),
        )
        .build()
        .unwrap();

    registry.register(SyntaxKind::Structure, descriptor).unwrap();

    let view = registry.ordered_view(SyntaxKind::Structure);
    match view[0].data() {
        DescriptorData::Structure {
            entry_validator,
            shape,
        } => {
            assert_eq!(*shape, NodeShape::Block);
            let validator = entry_validator.as_ref().unwrap();
            assert!(validator.check(["trigger", "aliases"]).is_ok());
            assert!(validator.check(["aliases"]).is_err());
        }
        other => panic!("expected structure payload, got {other:?}"),
    }
}

#[test]
fn test_failed_build_registers_nothing() {
    let registry = SyntaxRegistry::new();

    // A bare element type is not constructible without a factory, so
    // there is no descriptor to register in the first place.
    let result = DescriptorBuilder::for_element(ElementType::of::<dyn SyntaxElement>())
        .origin(Origin::new("AddonA"))
        .pattern("hello")
        .build();

    let err = result.unwrap_err();
    assert!(err.is_configuration());
    assert!(registry.is_empty());
}

#[rstest]
#[case::effect(SyntaxKind::Effect)]
#[case::condition(SyntaxKind::Condition)]
#[case::section(SyntaxKind::Section)]
fn test_plain_kinds_accept_plain_descriptors(#[case] kind: SyntaxKind) {
    let registry = SyntaxRegistry::new();
    let descriptor = DescriptorBuilder::new::<Greet>()
        .origin(Origin::new("AddonA"))
        .pattern("hello")
        .build()
        .unwrap();

    registry.register(kind, descriptor).unwrap();
    assert_eq!(registry.len(kind), 1);
}

#[rstest]
#[case::expression(SyntaxKind::Expression)]
#[case::structure(SyntaxKind::Structure)]
fn test_typed_kinds_reject_plain_descriptors(#[case] kind: SyntaxKind) {
    let registry = SyntaxRegistry::new();
    let descriptor = DescriptorBuilder::new::<Greet>()
        .origin(Origin::new("AddonA"))
        .pattern("hello")
        .build()
        .unwrap();

    let err = registry.register(kind, descriptor).unwrap_err();
    assert!(matches!(err, RegistryError::KindMismatch { .. }));
    assert!(registry.is_empty());
}
