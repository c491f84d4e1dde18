//! Matching rules for each signature variant.

use pretty_assertions::assert_eq;
use sinbad_sig::{PrimKind, Shape, Signature, TypeName, TypeRegistry};
use sinbad_unify::{ConstructorResolver, UnifyErrorKind};

use crate::common::{c1, c2, c2_resolved, composite, registry, sig};

fn resolver() -> ConstructorResolver<TypeRegistry> {
    ConstructorResolver::new(registry())
}

// Primitives

#[test]
fn primitive_matches_its_own_kind() {
    let resolver = resolver();
    for kind in PrimKind::ALL {
        for widening in [false, true] {
            let unifier = resolver.unifier(Shape::Prim(kind)).with_widening(widening);
            let declared = Signature::Prim(kind);
            assert_eq!(unifier.apply(&declared), Ok(declared.clone()));
            assert!(unifier.unifies_with(&declared));
        }
    }
}

#[test]
fn boolean_widens_to_string_only_when_enabled() {
    let resolver = resolver();
    let widening = resolver.unifier(Shape::STRING).with_widening(true);
    assert_eq!(widening.apply(&Signature::BOOLEAN), Ok(Signature::BOOLEAN));

    let exact = resolver.unifier(Shape::STRING);
    assert!(!exact.unifies_with(&Signature::BOOLEAN));
}

#[test]
fn string_does_not_narrow_to_boolean() {
    let resolver = resolver();
    let unifier = resolver.unifier(Shape::BOOLEAN).with_widening(true);
    let err = unifier.apply(&Signature::STRING).expect_err("narrowing");
    assert_eq!(
        err.kind(),
        &UnifyErrorKind::PrimitiveMismatch {
            expected: PrimKind::String,
            found: PrimKind::Boolean,
            widening: true,
        }
    );
}

#[test]
fn boolean_never_matches_float() {
    let resolver = resolver();
    for widening in [false, true] {
        let unifier = resolver.unifier(Shape::FLOAT).with_widening(widening);
        assert!(unifier.apply(&Signature::BOOLEAN).is_err());
    }
}

// Lists

#[test]
fn int_list_matches_int_arrays_and_sequences() {
    let resolver = resolver();
    let declared = Signature::list(Signature::INT);
    for subject in [Shape::array(Shape::INT), Shape::sequence(Shape::INT)] {
        assert_eq!(
            resolver.unifier(subject).apply(&declared),
            Ok(declared.clone())
        );
    }
}

#[test]
fn int_list_rejects_string_elements() {
    let resolver = resolver();
    let declared = Signature::list(Signature::INT);
    for subject in [Shape::array(Shape::STRING), Shape::sequence(Shape::STRING)] {
        for widening in [false, true] {
            let unifier = resolver.unifier(subject.clone()).with_widening(widening);
            assert!(!unifier.unifies_with(&declared), "{subject}, widening {widening}");
        }
    }
}

#[test]
fn two_dimensional_lists() {
    let resolver = resolver();
    let declared = sig("[[string]]");

    let strings = Shape::array(Shape::array(Shape::STRING));
    assert_eq!(resolver.unifier(strings).apply(&declared), Ok(declared.clone()));

    let ints = Shape::array(Shape::array(Shape::INT));
    let err = resolver.unifier(ints).apply(&declared).expect_err("int cells");
    assert_eq!(err.path().to_string(), "[][]");
}

// Composites

#[test]
fn single_argument_composite() {
    let resolver = resolver();
    let unifier = resolver.unifier(Shape::object("ClassA"));
    assert!(unifier.unifies_with(&c1()));
    assert_eq!(unifier.apply(&c1()), Ok(c1()));
}

#[test]
fn wildcards_take_the_parameter_types() {
    let resolver = resolver();
    let unifier = resolver.unifier(Shape::object("ClassA"));
    assert!(unifier.unifies_with(&c2()));
    assert_eq!(unifier.apply(&c2()), Ok(c2_resolved()));
    assert_eq!(unifier.apply(&c2()), Ok(c2_resolved()));
}

#[test]
fn nested_composites() {
    let resolver = resolver();
    let declared = sig(
        "ClassB(querty: double, drum: ClassA(foo: string), tom: ClassA(f: _, t: int, zip: _))",
    );
    let expected = sig(
        "ClassB(querty: double, drum: ClassA(foo: string), \
         tom: ClassA(f: string, t: int, zip: boolean))",
    );

    let resolved = resolver
        .unifier(Shape::object("ClassB"))
        .apply(&declared)
        .expect("resolves");
    assert_eq!(resolved, expected);
    assert!(resolved.is_resolved());
}

#[test]
fn mismatched_sole_argument_fails_entirely() {
    let resolver = resolver();
    let unifier = resolver.unifier(Shape::object("ClassA"));
    let declared = sig("ClassA(foo: boolean)");
    assert!(!unifier.unifies_with(&declared));

    let err = unifier.apply(&declared).expect_err("no boolean constructor");
    assert!(matches!(
        err.kind(),
        UnifyErrorKind::NoCandidateConstructor {
            tried: 1,
            position: 0,
            ..
        }
    ));

    let list_arg = sig("ClassA(x: [int])");
    assert!(!unifier.unifies_with(&list_arg));
}

#[test]
fn widening_lets_boolean_reach_a_string_parameter() {
    let resolver = resolver();
    let declared = sig("ClassA(foo: boolean)");
    let resolved = resolver
        .unifier(Shape::object("ClassA"))
        .with_widening(true)
        .apply(&declared)
        .expect("boolean widens to string");
    assert_eq!(resolved, declared);
}

#[test]
fn arity_selects_the_constructor() {
    let resolver = resolver();
    let unifier = resolver.unifier(Shape::object("ClassA"));
    for (source, index) in [
        ("ClassA()", 0),
        ("ClassA(_)", 1),
        ("ClassA(_, _)", 2),
        ("ClassA(_, _, _)", 3),
    ] {
        let signature = composite(source);
        let resolution = unifier.resolve_constructor(&signature).expect(source);
        assert_eq!(resolution.params.len(), signature.arity(), "{source}");
        assert_eq!(resolution.constructor.index, index, "{source}");
    }

    let err = unifier
        .apply(&sig("ClassA(_, _, _, _)"))
        .expect_err("no four-argument constructor");
    assert_eq!(
        err.kind(),
        &UnifyErrorKind::ArityMismatch {
            target: TypeName::new("ClassA"),
            arity: 4,
            available: [0, 1, 2, 3].into_iter().collect(),
        }
    );
}

#[test]
fn later_constructor_is_used_when_the_earlier_one_fails() {
    let resolver = resolver();
    let unifier = resolver.unifier(Shape::object("ClassA"));
    let resolution = unifier
        .resolve_constructor(&composite("ClassA(int, int, int)"))
        .expect("resolves");
    assert_eq!(resolution.constructor.index, 4);
}

#[test]
fn declaration_order_breaks_ties() {
    let reversed = TypeRegistry::new().with(
        sinbad_sig::TypeDescriptor::new("ClassA")
            .positional([Shape::INT, Shape::INT, Shape::INT])
            .positional([Shape::STRING, Shape::INT, Shape::BOOLEAN]),
    );
    let resolver = ConstructorResolver::new(reversed);
    let resolved = resolver
        .unifier(Shape::object("ClassA"))
        .apply(&c2())
        .expect("resolves");
    assert_eq!(resolved, sig("ClassA(f: int, t: int, zip: int)"));
}

#[test]
fn widening_applies_to_constructor_parameters() {
    let resolver = resolver();
    let declared = composite("ClassA(a: int, b: int)");

    let exact = resolver.unifier(Shape::object("ClassA"));
    assert!(exact.resolve_constructor(&declared).is_err());

    let widening = resolver.unifier(Shape::object("ClassA")).with_widening(true);
    let resolution = widening.resolve_constructor(&declared).expect("int widens");
    assert_eq!(resolution.constructor.index, 2);
    assert_eq!(resolution.signature, declared);
}

#[test]
fn composite_against_a_list_is_a_shape_mismatch() {
    let resolver = resolver();
    let err = resolver
        .unifier(Shape::array(Shape::object("ClassA")))
        .apply(&c1())
        .expect_err("list subject");
    assert!(matches!(err.kind(), UnifyErrorKind::ShapeMismatch { .. }));
}

#[test]
fn failure_path_points_into_nested_lists() {
    let resolver = resolver();
    let declared = sig("Album(title: string, tracks: [Track(name: string, seconds: boolean)])");
    let err = resolver
        .unifier(Shape::object("Album"))
        .apply(&declared)
        .expect_err("seconds is an int");

    let UnifyErrorKind::NoCandidateConstructor { position, cause, .. } = err.kind() else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(*position, 1);
    assert_eq!(cause.path().to_string(), "tracks[]");

    let root = err.root_cause();
    assert_eq!(root.path().to_string(), "seconds");
    assert_eq!(
        root.kind(),
        &UnifyErrorKind::PrimitiveMismatch {
            expected: PrimKind::Boolean,
            found: PrimKind::Int,
            widening: false,
        }
    );
}

// Wildcards

#[test]
fn wildcard_reflects_the_subject() {
    let resolver = resolver();
    let cases = [
        (Shape::DOUBLE, "double"),
        (Shape::array(Shape::STRING), "[string]"),
        (Shape::sequence(Shape::array(Shape::LONG)), "[[long]]"),
        (Shape::object("Track"), "Track(name: string, seconds: int)"),
    ];
    for (subject, expected) in cases {
        let resolved = resolver
            .unifier(subject)
            .apply(&Signature::WILDCARD)
            .expect("wildcards close");
        assert_eq!(resolved, sig(expected));
    }
}

#[test]
fn wildcard_closes_nested_objects() {
    let resolver = resolver();
    let resolved = resolver
        .unifier(Shape::object("Album"))
        .apply(&Signature::WILDCARD)
        .expect("closes");
    assert_eq!(
        resolved,
        sig("Album(title: string, tracks: [Track(name: string, seconds: int)])")
    );
}

#[test]
fn wildcard_uses_the_first_constructor() {
    let resolver = resolver();
    let resolved = resolver
        .unifier(Shape::object("ClassB"))
        .apply(&Signature::WILDCARD)
        .expect("closes");
    assert_eq!(resolved, sig("ClassB(arg0: int, arg1: int, arg2: int)"));
}

#[test]
fn wildcard_over_a_self_referential_type_fails() {
    let resolver = resolver();
    let err = resolver
        .unifier(Shape::object("Node"))
        .apply(&Signature::WILDCARD)
        .expect_err("Node contains Node");
    assert_eq!(
        err.kind(),
        &UnifyErrorKind::CircularType {
            target: TypeName::new("Node"),
        }
    );
    assert_eq!(err.path().to_string(), "next");

    let err = resolver
        .unifier(Shape::object("Node"))
        .apply(&sig("Node(value: int, next: _)"))
        .expect_err("Node contains Node");
    assert!(matches!(
        err.root_cause().kind(),
        UnifyErrorKind::CircularType { .. }
    ));
}

#[test]
fn wildcard_over_a_type_without_constructors_fails() {
    let resolver = resolver();
    let err = resolver
        .unifier(Shape::object("Handle"))
        .apply(&Signature::WILDCARD)
        .expect_err("Handle has no constructors");
    assert_eq!(
        err.kind(),
        &UnifyErrorKind::NoConstructors {
            target: TypeName::new("Handle"),
        }
    );

    let err = resolver
        .unifier(Shape::object("Missing"))
        .apply(&Signature::WILDCARD)
        .expect_err("unknown type");
    assert!(matches!(err.kind(), UnifyErrorKind::UnknownType { .. }));
}

#[test]
fn closed_wildcard_prints_as_a_parsable_literal() {
    let registry = TypeRegistry::new()
        .with(
            sinbad_sig::TypeDescriptor::new("Order")
                .constructor([sinbad_sig::Param::new("order id", Shape::INT)]),
        )
        .with(
            sinbad_sig::TypeDescriptor::new("int")
                .constructor([sinbad_sig::Param::new("v", Shape::INT)]),
        );
    let resolver = ConstructorResolver::new(registry);

    for (subject, printed) in [
        (Shape::object("Order"), "Order(`order id`: int)"),
        (Shape::object("int"), "`int`(v: int)"),
    ] {
        let closed = resolver
            .unifier(subject)
            .apply(&Signature::WILDCARD)
            .expect("closes");
        assert_eq!(closed.to_string(), printed);
        assert_eq!(sig(printed), closed);
    }
}
