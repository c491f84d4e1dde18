//! One top-level unification attempt.
//!
//! A session walks a signature against a shape, resolving composites
//! through the owning resolver. Resolutions found along the way are staged
//! in the session and only reach the shared cache through [`Session::commit`],
//! which callers invoke after the top-level attempt succeeded. A failed
//! attempt drops the session, so the cache looks exactly as it did before.

use std::sync::Arc;

use sinbad_sig::{
    widens, ArgSpec, CompositeSig, ConstructorRef, Shape, Signature, TypeCatalog, TypeName,
};
use sinbad_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::{ConstructorResolver, Resolution};
use crate::error::{PathSegment, UnifyError, UnifyErrorKind};

pub(crate) struct Session<'r, C> {
    resolver: &'r ConstructorResolver<C>,
    widening: bool,
    staged: Vec<(CompositeSig, Arc<Resolution>)>,
}

impl<'r, C: TypeCatalog> Session<'r, C> {
    pub(crate) fn new(resolver: &'r ConstructorResolver<C>, widening: bool) -> Self {
        Session {
            resolver,
            widening,
            staged: Vec::new(),
        }
    }

    /// Publish staged resolutions to the shared cache.
    pub(crate) fn commit(self) {
        if self.staged.is_empty() {
            return;
        }
        tracing::trace!(entries = self.staged.len(), "committing resolutions");
        let cache = self.resolver.cache();
        for (signature, resolution) in self.staged {
            cache.insert(signature, self.widening, resolution);
        }
    }

    /// Unify `signature` with `subject`, producing the resolved signature.
    pub(crate) fn unify(
        &mut self,
        signature: &Signature,
        subject: &Shape,
    ) -> Result<Signature, UnifyError> {
        ensure_sufficient_stack(|| match signature {
            Signature::Prim(kind) => match subject {
                Shape::Prim(found) if found == kind => Ok(Signature::Prim(*kind)),
                Shape::Prim(found) if self.widening && widens(*kind, *found) => {
                    tracing::trace!(from = %kind, to = %found, "widened primitive");
                    Ok(Signature::Prim(*kind))
                }
                Shape::Prim(found) => Err(UnifyErrorKind::PrimitiveMismatch {
                    expected: *kind,
                    found: *found,
                    widening: self.widening,
                }
                .into()),
                _ => Err(shape_mismatch(format!("`{kind}`"), subject)),
            },

            Signature::List(element) => {
                let Some(component) = subject.element() else {
                    return Err(shape_mismatch(signature.describe(), subject));
                };
                let resolved = self
                    .unify(element, component)
                    .map_err(|err| err.within(PathSegment::Element))?;
                Ok(Signature::list(resolved))
            }

            Signature::Composite(composite) => match subject {
                Shape::Object(name) if name == composite.target() => {
                    let resolution = self.resolve(composite)?;
                    Ok(Signature::Composite(resolution.signature.clone()))
                }
                _ => Err(shape_mismatch(
                    format!("an object of type `{}`", composite.target()),
                    subject,
                )),
            },

            Signature::Wildcard => close(self.resolver.catalog(), subject, &mut Vec::new()),
        })
    }

    /// Resolve a composite against its own target type.
    #[tracing::instrument(level = "trace", skip_all, fields(
        target = %composite.target(),
        arity = composite.arity(),
    ))]
    pub(crate) fn resolve(
        &mut self,
        composite: &CompositeSig,
    ) -> Result<Arc<Resolution>, UnifyError> {
        let caching = self.resolver.options().caching;
        if caching {
            // Staged entries are not in the shared cache yet; a lookup
            // there would count a miss for them.
            if let Some((_, staged)) = self.staged.iter().find(|(key, _)| key == composite) {
                return Ok(Arc::clone(staged));
            }
            if let Some(hit) = self.resolver.cache().get(composite, self.widening) {
                tracing::debug!(constructor = %hit.constructor, "resolution cache hit");
                return Ok(hit);
            }
        }

        let resolution = Arc::new(self.select(composite)?);
        if caching {
            self.staged.push((composite.clone(), Arc::clone(&resolution)));
        }
        Ok(resolution)
    }

    /// First-match constructor selection in declaration order.
    fn select(&mut self, composite: &CompositeSig) -> Result<Resolution, UnifyError> {
        let resolver = self.resolver;
        let target = composite.target();
        let arity = composite.arity();
        let constructors = resolver.catalog().constructors(target).ok_or_else(|| {
            UnifyError::new(UnifyErrorKind::UnknownType {
                target: target.clone(),
            })
        })?;

        let mut tried = 0;
        // Failure of the candidate that got furthest; ties keep the earlier one.
        let mut closest: Option<(usize, UnifyError)> = None;

        'candidates: for constructor in constructors.iter().filter(|c| c.arity() == arity) {
            tried += 1;
            let mut resolved = Vec::with_capacity(arity);
            for (position, (arg, param)) in
                composite.args().iter().zip(constructor.params()).enumerate()
            {
                match self.unify(&arg.signature, &param.shape) {
                    Ok(signature) => resolved.push(ArgSpec::new(arg.name.clone(), signature)),
                    Err(err) => {
                        tracing::trace!(
                            candidate = constructor.index(),
                            position,
                            error = %err,
                            "constructor rejected"
                        );
                        let further = match &closest {
                            Some((best, _)) => position > *best,
                            None => true,
                        };
                        if further {
                            let err =
                                err.within(PathSegment::argument(position, arg.name.clone()));
                            closest = Some((position, err));
                        }
                        continue 'candidates;
                    }
                }
            }

            let constructor_ref = ConstructorRef {
                target: target.clone(),
                index: constructor.index(),
            };
            tracing::debug!(constructor = %constructor_ref, "constructor selected");
            return Ok(Resolution {
                constructor: constructor_ref,
                params: constructor.params().to_vec(),
                signature: CompositeSig::from_args(target.clone(), resolved),
            });
        }

        let kind = match closest {
            Some((position, cause)) => UnifyErrorKind::NoCandidateConstructor {
                target: target.clone(),
                arity,
                tried,
                position,
                cause: Box::new(cause),
            },
            None => {
                let mut available: SmallVec<[usize; 4]> = SmallVec::new();
                for constructor in constructors {
                    if !available.contains(&constructor.arity()) {
                        available.push(constructor.arity());
                    }
                }
                UnifyErrorKind::ArityMismatch {
                    target: target.clone(),
                    arity,
                    available,
                }
            }
        };
        Err(kind.into())
    }
}

/// Close a wildcard over a concrete shape.
///
/// Objects close over their first declared constructor, with each argument
/// named after its parameter. `visiting` holds the object types currently
/// being closed.
fn close<C: TypeCatalog>(
    catalog: &C,
    subject: &Shape,
    visiting: &mut Vec<TypeName>,
) -> Result<Signature, UnifyError> {
    ensure_sufficient_stack(|| match subject {
        Shape::Prim(kind) => Ok(Signature::Prim(*kind)),
        Shape::Array(element) | Shape::Sequence(element) => {
            let closed =
                close(catalog, element, visiting).map_err(|err| err.within(PathSegment::Element))?;
            Ok(Signature::list(closed))
        }
        Shape::Object(name) => {
            if visiting.contains(name) {
                return Err(UnifyErrorKind::CircularType {
                    target: name.clone(),
                }
                .into());
            }
            let constructors = catalog.constructors(name).ok_or_else(|| {
                UnifyError::new(UnifyErrorKind::UnknownType {
                    target: name.clone(),
                })
            })?;
            let Some(first) = constructors.first() else {
                return Err(UnifyErrorKind::NoConstructors {
                    target: name.clone(),
                }
                .into());
            };

            visiting.push(name.clone());
            let mut args = Vec::with_capacity(first.arity());
            for (index, param) in first.params().iter().enumerate() {
                let closed = close(catalog, &param.shape, visiting)
                    .map_err(|err| err.within(PathSegment::argument(index, param.name.clone())))?;
                args.push(ArgSpec::new(param.name.clone(), closed));
            }
            visiting.pop();

            Ok(CompositeSig::from_args(name.clone(), args).into())
        }
    })
}

fn shape_mismatch(expected: impl Into<String>, found: &Shape) -> UnifyError {
    UnifyErrorKind::ShapeMismatch {
        expected: expected.into(),
        found: found.clone(),
    }
    .into()
}
