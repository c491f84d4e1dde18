//! Stack growth guard for recursive walks over signature trees.
//!
//! Signature literals and the trees built from them can nest arbitrarily
//! (`[[[[int]]]]`, composites inside composites). The parser and the unifier
//! both recurse once per level, so each recursive step runs inside
//! [`ensure_sufficient_stack`], which moves execution onto a freshly
//! allocated segment when the current one is close to exhausted.
//!
//! On `wasm32` the guard is a plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; the wasm runtime manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
