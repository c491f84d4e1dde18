//! Shape unifier.
//!
//! A [`ShapeUnifier`] pairs one subject shape with the widening flag and
//! unifies signatures against it. It is cheap to build and meant to be
//! created per attempt; all shared state lives in the resolver it borrows.
//!
//! Matching rules, by signature variant:
//!
//! | signature      | subject                 | result                                    |
//! |----------------|-------------------------|-------------------------------------------|
//! | `Prim(k)`      | `Prim(s)`               | `Prim(k)` if `k == s`, or `widens(k, s)` when widening |
//! | `List(e)`      | `Array(x)`/`Sequence(x)`| `List(e unified with x)`                  |
//! | `Composite(c)` | `Object(c.target)`      | `c` with every argument resolved          |
//! | `Wildcard`     | any                     | the subject as a signature                |
//!
//! Every other pairing is a [`ShapeMismatch`](crate::UnifyErrorKind::ShapeMismatch).

use std::sync::Arc;

use sinbad_sig::{CompositeSig, Shape, Signature, TypeCatalog};

use crate::error::{UnifyError, UnifyErrorKind};
use crate::resolver::{ConstructorResolver, Resolution};

/// Unifies signatures against one subject shape.
#[derive(Debug)]
pub struct ShapeUnifier<'r, C> {
    resolver: &'r ConstructorResolver<C>,
    subject: Shape,
    allow_widening: bool,
}

impl<'r, C: TypeCatalog> ShapeUnifier<'r, C> {
    /// A unifier over `subject` with widening disabled.
    pub fn new(resolver: &'r ConstructorResolver<C>, subject: Shape) -> Self {
        ShapeUnifier {
            resolver,
            subject,
            allow_widening: false,
        }
    }

    #[must_use]
    pub fn with_widening(mut self, allow_widening: bool) -> Self {
        self.allow_widening = allow_widening;
        self
    }

    #[inline]
    pub fn subject(&self) -> &Shape {
        &self.subject
    }

    #[inline]
    pub fn allows_widening(&self) -> bool {
        self.allow_widening
    }

    /// Resolve `signature` against the subject.
    ///
    /// The result contains no wildcards. On failure the resolver's cache is
    /// left as it was.
    pub fn apply(&self, signature: &Signature) -> Result<Signature, UnifyError> {
        self.resolver.apply(signature, &self.subject, self.allow_widening)
    }

    /// Whether [`apply`](Self::apply) would succeed.
    pub fn unifies_with(&self, signature: &Signature) -> bool {
        self.apply(signature).is_ok()
    }

    /// The constructor a composite signature resolves to.
    ///
    /// The subject must be an object of the signature's target type.
    pub fn resolve_constructor(
        &self,
        signature: &CompositeSig,
    ) -> Result<Arc<Resolution>, UnifyError> {
        match &self.subject {
            Shape::Object(name) if name == signature.target() => {
                self.resolver.resolve(signature, self.allow_widening)
            }
            other => Err(UnifyErrorKind::ShapeMismatch {
                expected: format!("an object of type `{}`", signature.target()),
                found: other.clone(),
            }
            .into()),
        }
    }
}
