//! Error codes for every diagnostic the engine can produce.
//!
//! The first digit names the phase:
//! - E0xxx: signature literal syntax
//! - E1xxx: unification and constructor resolution

use std::fmt;

/// Error codes for all engine diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Signature syntax (E0xxx)
    /// Unexpected token in a signature literal
    E0001,
    /// Signature literal ended early
    E0002,
    /// Unrecognised character in a signature literal
    E0003,
    /// Input left over after a complete signature
    E0004,

    // Unification (E1xxx)
    /// Primitive kind mismatch
    E1001,
    /// Shape mismatch (list vs scalar, composite vs other)
    E1002,
    /// No constructor with the declared argument count
    E1003,
    /// Every constructor of matching arity was rejected
    E1004,
    /// Target type is not registered
    E1005,
    /// Target type has no constructors
    E1006,
    /// Target type refers to itself while closing a wildcard
    E1007,
}

impl ErrorCode {
    /// All error code variants, in numeric order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
        }
    }

    /// Short human-readable summary, used by `--explain`-style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unexpected token in signature",
            ErrorCode::E0002 => "unexpected end of signature",
            ErrorCode::E0003 => "unrecognised character in signature",
            ErrorCode::E0004 => "trailing input after signature",
            ErrorCode::E1001 => "primitive kind mismatch",
            ErrorCode::E1002 => "shape mismatch",
            ErrorCode::E1003 => "no constructor with matching arity",
            ErrorCode::E1004 => "no candidate constructor accepts the arguments",
            ErrorCode::E1005 => "unknown target type",
            ErrorCode::E1006 => "target type has no constructors",
            ErrorCode::E1007 => "circular type definition",
        }
    }

    /// Whether this code belongs to the signature syntax phase.
    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Whether this code belongs to the unification phase.
    pub fn is_unify_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
