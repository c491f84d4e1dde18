//! Constructor resolution.
//!
//! Given a composite signature, [`ConstructorResolver`] enumerates the
//! target type's constructors in declaration order, keeps those whose
//! arity equals the signature's, and picks the first one whose every
//! parameter unifies with the corresponding argument signature. Ambiguous
//! overloads therefore resolve by declaration order, not specificity.
//!
//! Successful resolutions are cached per `(signature, allow_widening)`, so
//! a structurally equal signature never enumerates constructors twice.

mod cache;
mod session;

use std::sync::Arc;

use sinbad_sig::{CompositeSig, ConstructorRef, Param, Shape, Signature, TypeCatalog};

pub use cache::{CacheStats, ResolutionCache};
use session::Session;

use crate::error::UnifyError;
use crate::unifier::ShapeUnifier;

/// A selected constructor together with the resolved signature.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    /// The chosen constructor.
    pub constructor: ConstructorRef,
    /// Its declared parameters, in order.
    pub params: Vec<Param>,
    /// The input signature with every argument resolved.
    pub signature: CompositeSig,
}

/// Resolver configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResolverOptions {
    /// Cache successful resolutions. When off, every resolution enumerates
    /// constructors again.
    pub caching: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        ResolverOptions { caching: true }
    }
}

/// Selects constructors for composite signatures and caches the result.
///
/// `Send + Sync` whenever the catalog is; share one resolver across
/// threads to share its cache.
#[derive(Debug)]
pub struct ConstructorResolver<C> {
    catalog: C,
    cache: ResolutionCache,
    options: ResolverOptions,
}

impl<C: TypeCatalog> ConstructorResolver<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_options(catalog, ResolverOptions::default())
    }

    pub fn with_options(catalog: C, options: ResolverOptions) -> Self {
        ConstructorResolver {
            catalog,
            cache: ResolutionCache::new(),
            options,
        }
    }

    #[inline]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    #[inline]
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    #[inline]
    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// A unifier over `subject`, widening disabled.
    pub fn unifier(&self, subject: Shape) -> ShapeUnifier<'_, C> {
        ShapeUnifier::new(self, subject)
    }

    /// Unify `signature` with `subject` in one call.
    pub fn apply(
        &self,
        signature: &Signature,
        subject: &Shape,
        allow_widening: bool,
    ) -> Result<Signature, UnifyError> {
        let mut session = Session::new(self, allow_widening);
        let resolved = session.unify(signature, subject)?;
        debug_assert!(resolved.is_resolved());
        session.commit();
        Ok(resolved)
    }

    /// Select a constructor of `signature`'s target type.
    ///
    /// On failure the cache is left untouched, including entries for any
    /// nested composites that did resolve along the way.
    #[tracing::instrument(level = "debug", skip_all, fields(
        target = %signature.target(),
        arity = signature.arity(),
        widening = allow_widening,
    ))]
    pub fn resolve(
        &self,
        signature: &CompositeSig,
        allow_widening: bool,
    ) -> Result<Arc<Resolution>, UnifyError> {
        let mut session = Session::new(self, allow_widening);
        let resolution = session.resolve(signature)?;
        debug_assert_eq!(resolution.params.len(), signature.arity());
        session.commit();
        Ok(resolution)
    }
}
