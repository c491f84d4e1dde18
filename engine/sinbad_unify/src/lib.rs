//! Signature unification for the Sinbad binding engine.
//!
//! Unification checks a declared [`Signature`](sinbad_sig::Signature)
//! against the concrete [`Shape`](sinbad_sig::Shape) of a target and, on
//! success, returns the signature with every wildcard closed and every
//! composite bound to a constructor:
//!
//! ```text
//! ClassA(f: _, t: int, zip: _)   against   ClassA { (string, int, boolean), .. }
//!   => ClassA(f: string, t: int, zip: boolean)
//! ```
//!
//! # Architecture
//!
//! - [`ShapeUnifier`]: one subject shape plus the widening flag; the entry
//!   point for `apply` and `unifies_with`.
//! - [`ConstructorResolver`]: owns the type catalog and the shared
//!   [`ResolutionCache`]; selects the first constructor, in declaration
//!   order, whose parameters all unify.
//! - [`UnifyError`]: a single failure with the path to where it happened.
//!
//! A failed attempt never changes the cache. The resolver is safe to share
//! across threads.

mod error;
mod resolver;
mod unifier;

use std::sync::Once;

pub use error::{PathSegment, UnifyError, UnifyErrorKind, UnifyPath};
pub use resolver::{
    CacheStats, ConstructorResolver, Resolution, ResolutionCache, ResolverOptions,
};
pub use unifier::ShapeUnifier;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only runs once per process.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
