//! Shared fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};

use sinbad_sig::{
    CompositeSig, Constructor, Param, Shape, Signature, TypeCatalog, TypeDescriptor, TypeName,
    TypeRegistry,
};

/// `ClassA` and `ClassB` plus a few helper types.
///
/// `ClassA` lists `(string, int, boolean)` before `(int, int, int)`, so a
/// `(_, int, _)` signature resolves to the former.
pub fn registry() -> TypeRegistry {
    TypeRegistry::new()
        .with(
            TypeDescriptor::new("ClassA")
                .constructor(Vec::<Param>::new())
                .positional([Shape::STRING])
                .positional([Shape::FLOAT, Shape::INT])
                .positional([Shape::STRING, Shape::INT, Shape::BOOLEAN])
                .positional([Shape::INT, Shape::INT, Shape::INT]),
        )
        .with(
            TypeDescriptor::new("ClassB")
                .positional([Shape::INT, Shape::INT, Shape::INT])
                .positional([Shape::DOUBLE, Shape::object("ClassA"), Shape::object("ClassA")]),
        )
        .with(TypeDescriptor::new("Track").constructor([
            Param::new("name", Shape::STRING),
            Param::new("seconds", Shape::INT),
        ]))
        .with(TypeDescriptor::new("Album").constructor([
            Param::new("title", Shape::STRING),
            Param::new("tracks", Shape::sequence(Shape::object("Track"))),
        ]))
        .with(TypeDescriptor::new("Node").constructor([
            Param::new("value", Shape::INT),
            Param::new("next", Shape::object("Node")),
        ]))
        .with(TypeDescriptor::new("Handle"))
}

pub fn sig(source: &str) -> Signature {
    Signature::parse(source).expect("valid signature")
}

pub fn composite(source: &str) -> CompositeSig {
    match sig(source) {
        Signature::Composite(composite) => composite,
        other => panic!("expected a composite, got {other}"),
    }
}

/// `ClassA(foo: string)`
pub fn c1() -> Signature {
    sig("ClassA(foo: string)")
}

/// `ClassA(f: _, t: int, zip: _)`
pub fn c2() -> Signature {
    sig("ClassA(f: _, t: int, zip: _)")
}

/// `c2` after resolution.
pub fn c2_resolved() -> Signature {
    sig("ClassA(f: string, t: int, zip: boolean)")
}

/// Catalog that counts constructor enumerations.
#[derive(Debug)]
pub struct CountingCatalog {
    inner: TypeRegistry,
    calls: AtomicUsize,
}

impl CountingCatalog {
    pub fn new(inner: TypeRegistry) -> Self {
        CountingCatalog {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TypeCatalog for CountingCatalog {
    fn constructors(&self, ty: &TypeName) -> Option<&[Constructor]> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.constructors(ty)
    }
}
