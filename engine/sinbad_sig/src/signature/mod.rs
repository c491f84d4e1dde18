//! Signatures: declarative descriptions of an expected data shape.
//!
//! A signature is declared once (literally or parsed from a schema) and then
//! unified against many runtime shapes. Unification turns an open signature,
//! one that still holds [`Signature::Wildcard`] slots, into a resolved one.
//!
//! # Variants
//!
//! ```text
//! Prim(kind)            int, boolean, string, ...
//! List(element)         [int], [[string]]
//! Composite(target,     ClassA(name: string, age: int)
//!           args)
//! Wildcard              _
//! ```
//!
//! Equality is structural. Two independently built trees with the same
//! variants and fields compare equal, which is what lets the resolver cache
//! key on signatures.

use std::fmt;

use crate::name::Literal;
use crate::{PrimKind, TypeName};

/// Expected shape of a value.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Signature {
    Prim(PrimKind),
    /// Homogeneous sequence of the element shape.
    List(Box<Signature>),
    Composite(CompositeSig),
    /// Open slot; takes on the concrete shape it is unified against.
    Wildcard,
}

/// Signature of a value built by calling a constructor of `target` with the
/// ordered arguments in `args`.
///
/// The argument order is fixed at construction time and is the order the
/// constructor parameters are matched in.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CompositeSig {
    target: TypeName,
    args: Vec<ArgSpec>,
}

/// A named constructor argument slot.
///
/// The name documents the slot; matching is positional.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ArgSpec {
    pub name: String,
    pub signature: Signature,
}

impl Signature {
    pub const BOOLEAN: Signature = Signature::Prim(PrimKind::Boolean);
    pub const BYTE: Signature = Signature::Prim(PrimKind::Byte);
    pub const SHORT: Signature = Signature::Prim(PrimKind::Short);
    pub const CHAR: Signature = Signature::Prim(PrimKind::Char);
    pub const INT: Signature = Signature::Prim(PrimKind::Int);
    pub const LONG: Signature = Signature::Prim(PrimKind::Long);
    pub const FLOAT: Signature = Signature::Prim(PrimKind::Float);
    pub const DOUBLE: Signature = Signature::Prim(PrimKind::Double);
    pub const STRING: Signature = Signature::Prim(PrimKind::String);
    pub const WILDCARD: Signature = Signature::Wildcard;

    pub fn list(element: Signature) -> Signature {
        Signature::List(Box::new(element))
    }

    /// Whether the tree is free of wildcards.
    pub fn is_resolved(&self) -> bool {
        match self {
            Signature::Prim(_) => true,
            Signature::List(element) => element.is_resolved(),
            Signature::Composite(composite) => composite.is_resolved(),
            Signature::Wildcard => false,
        }
    }

    /// Number of wildcard slots anywhere in the tree.
    pub fn wildcard_count(&self) -> usize {
        match self {
            Signature::Prim(_) => 0,
            Signature::List(element) => element.wildcard_count(),
            Signature::Composite(composite) => composite
                .args
                .iter()
                .map(|arg| arg.signature.wildcard_count())
                .sum(),
            Signature::Wildcard => 1,
        }
    }

    /// Nesting depth; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Signature::Prim(_) | Signature::Wildcard => 1,
            Signature::List(element) => 1 + element.depth(),
            Signature::Composite(composite) => {
                1 + composite
                    .args
                    .iter()
                    .map(|arg| arg.signature.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Short noun phrase for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Signature::Prim(_) => "a primitive",
            Signature::List(_) => "a list",
            Signature::Composite(_) => "an object",
            Signature::Wildcard => "anything",
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeSig> {
        match self {
            Signature::Composite(composite) => Some(composite),
            _ => None,
        }
    }
}

impl From<CompositeSig> for Signature {
    fn from(composite: CompositeSig) -> Self {
        Signature::Composite(composite)
    }
}

impl From<PrimKind> for Signature {
    fn from(kind: PrimKind) -> Self {
        Signature::Prim(kind)
    }
}

impl CompositeSig {
    /// Start a composite signature with no arguments.
    pub fn new(target: impl Into<TypeName>) -> Self {
        CompositeSig {
            target: target.into(),
            args: Vec::new(),
        }
    }

    pub fn from_args(target: impl Into<TypeName>, args: Vec<ArgSpec>) -> Self {
        CompositeSig {
            target: target.into(),
            args,
        }
    }

    /// Append an argument slot.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, signature: impl Into<Signature>) -> Self {
        self.args.push(ArgSpec::new(name, signature));
        self
    }

    #[inline]
    pub fn target(&self) -> &TypeName {
        &self.target
    }

    #[inline]
    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_resolved(&self) -> bool {
        self.args.iter().all(|arg| arg.signature.is_resolved())
    }
}

impl ArgSpec {
    pub fn new(name: impl Into<String>, signature: impl Into<Signature>) -> Self {
        ArgSpec {
            name: name.into(),
            signature: signature.into(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signature::Prim(kind) => write!(f, "{kind}"),
            Signature::List(element) => write!(f, "[{element}]"),
            Signature::Composite(composite) => write!(f, "{composite}"),
            Signature::Wildcard => f.write_str("_"),
        }
    }
}

impl fmt::Display for CompositeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = Literal {
            name: self.target.as_str(),
            keyword_safe: false,
        };
        write!(f, "{target}(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.signature)
        } else {
            let name = Literal {
                name: &self.name,
                keyword_safe: true,
            };
            write!(f, "{name}: {}", self.signature)
        }
    }
}
