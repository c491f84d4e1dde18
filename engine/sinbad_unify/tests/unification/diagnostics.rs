//! Converting unification failures into diagnostics.

use pretty_assertions::assert_eq;
use sinbad_diagnostic::ErrorCode;
use sinbad_sig::{Shape, TypeRegistry};
use sinbad_unify::{ConstructorResolver, UnifyError};

use crate::common::{registry, sig};

fn fail(subject: Shape, source: &str, widening: bool) -> UnifyError {
    let resolver: ConstructorResolver<TypeRegistry> = ConstructorResolver::new(registry());
    resolver
        .unifier(subject)
        .with_widening(widening)
        .apply(&sig(source))
        .expect_err("unification fails")
}

#[test]
fn primitive_mismatch_suggests_widening() {
    let diag = fail(Shape::STRING, "boolean", false).to_diagnostic();
    assert_eq!(
        diag.to_string(),
        "error[E1001]: primitive kind mismatch: expected `boolean`, found `string`\n\
         \x20 = help: enable widening to accept `boolean` data where `string` is expected\n"
    );
}

#[test]
fn nested_failure_reports_the_closest_candidate() {
    let err = fail(Shape::object("ClassA"), "ClassA(a: boolean, b: int)", true);
    let diag = err.to_diagnostic();

    assert_eq!(diag.code, ErrorCode::E1004);
    assert!(diag.is_error());
    assert_eq!(
        diag.notes,
        vec![
            "tried 1 constructor(s) in declaration order".to_owned(),
            "the closest candidate rejected argument 0: primitive kind mismatch: \
             expected `boolean`, found `float` at `a`"
                .to_owned(),
        ]
    );
}

#[test]
fn arity_mismatch_lists_arities() {
    let diag = fail(Shape::object("ClassB"), "ClassB(_)", false).to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1003);
    assert_eq!(diag.notes, vec!["constructors take 3 argument(s)".to_owned()]);
}

#[test]
fn shape_mismatch_names_both_sides() {
    let err = fail(Shape::INT, "[int]", false);
    assert_eq!(err.to_string(), "shape mismatch: expected a list, found `int`");
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1002);
    assert_eq!(diag.notes, vec!["`int` is a primitive".to_owned()]);

    let diag = fail(Shape::sequence(Shape::INT), "int", false).to_diagnostic();
    assert_eq!(diag.notes, vec!["`seq<int>` is a sequence".to_owned()]);
}

#[test]
fn circular_type_has_a_note() {
    let diag = fail(Shape::object("Node"), "_", false).to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1007);
    assert_eq!(
        diag.notes,
        vec![
            "at `next`".to_owned(),
            "wildcards close over the first declared constructor".to_owned(),
        ]
    );
}
