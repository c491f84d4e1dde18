//! Primitive kinds and the widening table.
//!
//! A primitive signature matches a primitive subject when the kinds are
//! equal, or, when the unifier opts in, when the declared kind widens to the
//! subject kind. Widening is one-directional: `from` is the kind the data
//! was declared with, `to` is the kind of the slot receiving it.
//!
//! ```text
//! boolean -> string
//! char    -> int, long, float, double, string
//! byte    -> short, int, long, float, double
//! short   -> int, long, float, double
//! int     -> long, float, double
//! long    -> float, double
//! float   -> double
//! ```

use std::fmt;

/// Kind of a primitive value.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
pub enum PrimKind {
    Boolean = 0,
    Byte = 1,
    Short = 2,
    Char = 3,
    Int = 4,
    Long = 5,
    Float = 6,
    Double = 7,
    String = 8,
}

impl PrimKind {
    /// Every kind, in discriminant order.
    pub const ALL: [PrimKind; 9] = [
        PrimKind::Boolean,
        PrimKind::Byte,
        PrimKind::Short,
        PrimKind::Char,
        PrimKind::Int,
        PrimKind::Long,
        PrimKind::Float,
        PrimKind::Double,
        PrimKind::String,
    ];

    /// Canonical lower-case name, as written in signature literals.
    pub const fn name(self) -> &'static str {
        match self {
            PrimKind::Boolean => "boolean",
            PrimKind::Byte => "byte",
            PrimKind::Short => "short",
            PrimKind::Char => "char",
            PrimKind::Int => "int",
            PrimKind::Long => "long",
            PrimKind::Float => "float",
            PrimKind::Double => "double",
            PrimKind::String => "string",
        }
    }

    /// Look up a kind by its canonical name.
    pub fn from_name(name: &str) -> Option<PrimKind> {
        PrimKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            PrimKind::Byte
                | PrimKind::Short
                | PrimKind::Int
                | PrimKind::Long
                | PrimKind::Float
                | PrimKind::Double
        )
    }

    /// Whether data declared as `self` may fill a slot of kind `to`.
    #[inline]
    pub const fn widens_to(self, to: PrimKind) -> bool {
        widens(self, to)
    }

    /// Kinds that `self` widens to, in discriminant order.
    pub fn widenings(self) -> impl Iterator<Item = PrimKind> {
        PrimKind::ALL.into_iter().filter(move |&to| widens(self, to))
    }
}

/// The widening table.
///
/// Identity is not widening: `widens(k, k)` is `false`, exact matches are
/// handled before the table is consulted.
pub const fn widens(from: PrimKind, to: PrimKind) -> bool {
    use PrimKind::{Boolean, Byte, Char, Double, Float, Int, Long, Short, String};

    match from {
        Boolean => matches!(to, String),
        Char => matches!(to, Int | Long | Float | Double | String),
        Byte => matches!(to, Short | Int | Long | Float | Double),
        Short => matches!(to, Int | Long | Float | Double),
        Int => matches!(to, Long | Float | Double),
        Long => matches!(to, Float | Double),
        Float => matches!(to, Double),
        Double | String => false,
    }
}

impl fmt::Display for PrimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
