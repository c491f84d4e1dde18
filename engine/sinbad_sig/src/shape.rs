//! Runtime shapes.
//!
//! A [`Shape`] is the concrete type a value will be bound to: a constructor
//! parameter's declared type, or the type a data source reports for an
//! incoming value. Signatures are unified against shapes.

use std::fmt;

use crate::{PrimKind, TypeName};

/// Concrete description of a runtime type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Shape {
    /// A primitive value.
    Prim(PrimKind),
    /// Fixed-size array, e.g. `int[]` or `string[][]`.
    Array(Box<Shape>),
    /// Ordered, growable collection of elements.
    Sequence(Box<Shape>),
    /// A type built through one of its constructors.
    Object(TypeName),
}

impl Shape {
    pub const BOOLEAN: Shape = Shape::Prim(PrimKind::Boolean);
    pub const BYTE: Shape = Shape::Prim(PrimKind::Byte);
    pub const SHORT: Shape = Shape::Prim(PrimKind::Short);
    pub const CHAR: Shape = Shape::Prim(PrimKind::Char);
    pub const INT: Shape = Shape::Prim(PrimKind::Int);
    pub const LONG: Shape = Shape::Prim(PrimKind::Long);
    pub const FLOAT: Shape = Shape::Prim(PrimKind::Float);
    pub const DOUBLE: Shape = Shape::Prim(PrimKind::Double);
    pub const STRING: Shape = Shape::Prim(PrimKind::String);

    pub fn array(element: Shape) -> Shape {
        Shape::Array(Box::new(element))
    }

    pub fn sequence(element: Shape) -> Shape {
        Shape::Sequence(Box::new(element))
    }

    pub fn object(name: impl Into<TypeName>) -> Shape {
        Shape::Object(name.into())
    }

    /// Component shape of an array or sequence.
    pub fn element(&self) -> Option<&Shape> {
        match self {
            Shape::Array(element) | Shape::Sequence(element) => Some(element),
            Shape::Prim(_) | Shape::Object(_) => None,
        }
    }

    /// Short noun phrase for diagnostics ("an array", "an object").
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Prim(_) => "a primitive",
            Shape::Array(_) => "an array",
            Shape::Sequence(_) => "a sequence",
            Shape::Object(_) => "an object",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Prim(kind) => write!(f, "{kind}"),
            Shape::Array(element) => write!(f, "{element}[]"),
            Shape::Sequence(element) => write!(f, "seq<{element}>"),
            Shape::Object(name) => write!(f, "{name}"),
        }
    }
}
