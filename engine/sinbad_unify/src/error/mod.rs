//! Unification error types.
//!
//! A failed unification yields exactly one [`UnifyError`]. When the failure
//! sits below a composite or list, the error carries the path to it, so
//! `tom[].zip` reads "argument `tom`, any element, argument `zip`".
//! Failures under a composite are wrapped in
//! [`UnifyErrorKind::NoCandidateConstructor`], whose `cause` holds the
//! failure of the candidate that got furthest through its arguments.

use std::fmt;

use sinbad_diagnostic::{Diagnostic, ErrorCode};
use sinbad_sig::{widens, PrimKind, Shape, TypeName};
use smallvec::SmallVec;

/// Error from unifying a signature with a shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnifyError {
    kind: Box<UnifyErrorKind>,
    path: UnifyPath,
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum UnifyErrorKind {
    /// A primitive kind neither equals the subject kind nor (when allowed)
    /// widens to it.
    #[error("primitive kind mismatch: expected `{expected}`, found `{found}`")]
    PrimitiveMismatch {
        /// Kind declared in the signature.
        expected: PrimKind,
        /// Kind of the subject.
        found: PrimKind,
        /// Whether widening was enabled for the attempt.
        widening: bool,
    },

    /// The signature and subject have different structure: a list against
    /// a scalar, a primitive against an object, a composite against a
    /// different type.
    #[error("shape mismatch: expected {expected}, found `{found}`")]
    ShapeMismatch { expected: String, found: Shape },

    /// No constructor of the target type takes the declared number of
    /// arguments.
    #[error("`{target}` has no constructor taking {arity} argument(s)")]
    ArityMismatch {
        target: TypeName,
        arity: usize,
        /// Distinct constructor arities, in declaration order.
        available: SmallVec<[usize; 4]>,
    },

    /// Every constructor with the declared arity rejected some argument.
    #[error("no constructor of `{target}` taking {arity} argument(s) accepts the arguments")]
    NoCandidateConstructor {
        target: TypeName,
        arity: usize,
        /// Number of constructors tried.
        tried: usize,
        /// Highest argument position any candidate failed at. Ties go to
        /// the earliest-declared candidate.
        position: usize,
        /// Why that candidate failed.
        #[source]
        cause: Box<UnifyError>,
    },

    /// The catalog does not know the target type.
    #[error("unknown type `{target}`")]
    UnknownType { target: TypeName },

    /// A wildcard met an object whose type declares no constructors.
    #[error("`{target}` has no constructors")]
    NoConstructors { target: TypeName },

    /// A wildcard met an object whose first constructor leads back to the
    /// same type.
    #[error("`{target}` is defined in terms of itself")]
    CircularType { target: TypeName },
}

/// One step from a signature to a nested position.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PathSegment {
    /// A composite argument.
    Argument { index: usize, name: String },
    /// Any element of a list.
    Element,
}

impl PathSegment {
    pub fn argument(index: usize, name: impl Into<String>) -> Self {
        PathSegment::Argument {
            index,
            name: name.into(),
        }
    }
}

/// Path from the signature an error was reported against to the failing
/// position. Empty when the failure is at the top.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct UnifyPath(Vec<PathSegment>);

impl UnifyPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UnifyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Argument { index, name } => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    if name.is_empty() {
                        write!(f, "#{index}")?;
                    } else {
                        f.write_str(name)?;
                    }
                }
                PathSegment::Element => f.write_str("[]")?,
            }
        }
        Ok(())
    }
}

impl UnifyError {
    pub fn new(kind: UnifyErrorKind) -> Self {
        UnifyError {
            kind: Box::new(kind),
            path: UnifyPath::default(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &UnifyErrorKind {
        &self.kind
    }

    #[inline]
    pub fn path(&self) -> &UnifyPath {
        &self.path
    }

    /// Record that this error happened one level below `segment`.
    #[must_use]
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.0.insert(0, segment);
        self
    }

    /// The innermost cause, following `NoCandidateConstructor` chains.
    pub fn root_cause(&self) -> &UnifyError {
        match &*self.kind {
            UnifyErrorKind::NoCandidateConstructor { cause, .. } => cause.root_cause(),
            _ => self,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match &*self.kind {
            UnifyErrorKind::PrimitiveMismatch { .. } => ErrorCode::E1001,
            UnifyErrorKind::ShapeMismatch { .. } => ErrorCode::E1002,
            UnifyErrorKind::ArityMismatch { .. } => ErrorCode::E1003,
            UnifyErrorKind::NoCandidateConstructor { .. } => ErrorCode::E1004,
            UnifyErrorKind::UnknownType { .. } => ErrorCode::E1005,
            UnifyErrorKind::NoConstructors { .. } => ErrorCode::E1006,
            UnifyErrorKind::CircularType { .. } => ErrorCode::E1007,
        }
    }

    /// Convert to a diagnostic with notes and suggestions.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.kind.to_string());
        if !self.path.is_empty() {
            diag = diag.with_note(format!("at `{}`", self.path));
        }

        match &*self.kind {
            UnifyErrorKind::PrimitiveMismatch {
                expected,
                found,
                widening,
            } => {
                if !widening && widens(*expected, *found) {
                    diag.with_suggestion(format!(
                        "enable widening to accept `{expected}` data where `{found}` is expected"
                    ))
                } else {
                    diag.with_suggestion(format!("declare the argument as `{found}`"))
                }
            }
            UnifyErrorKind::ShapeMismatch { found, .. } => diag
                .with_note(format!("`{found}` is {}", found.describe()))
                .with_suggestion(format!("declare the argument as `{found}` or `_`")),
            UnifyErrorKind::ArityMismatch { available, .. } => {
                let arities: Vec<String> = available.iter().map(ToString::to_string).collect();
                if arities.is_empty() {
                    diag.with_note("the type declares no constructors")
                } else {
                    diag.with_note(format!(
                        "constructors take {} argument(s)",
                        arities.join(", ")
                    ))
                }
            }
            UnifyErrorKind::NoCandidateConstructor {
                tried,
                position,
                cause,
                ..
            } => diag
                .with_note(format!("tried {tried} constructor(s) in declaration order"))
                .with_note(format!(
                    "the closest candidate rejected argument {position}: {cause}"
                )),
            UnifyErrorKind::UnknownType { target } => {
                diag.with_suggestion(format!("register `{target}` in the type registry"))
            }
            UnifyErrorKind::NoConstructors { .. } => {
                diag.with_suggestion("declare this argument with an explicit signature")
            }
            UnifyErrorKind::CircularType { .. } => diag
                .with_note("wildcards close over the first declared constructor")
                .with_suggestion("declare this argument with an explicit signature"),
        }
    }
}

impl From<UnifyErrorKind> for UnifyError {
    fn from(kind: UnifyErrorKind) -> Self {
        UnifyError::new(kind)
    }
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} at `{}`", self.kind, self.path)
        }
    }
}

impl std::error::Error for UnifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&*self.kind)
    }
}
