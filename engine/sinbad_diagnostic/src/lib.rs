//! Diagnostics for the Sinbad binding engine.
//!
//! Every failure surfaced to a caller (a malformed signature literal, a
//! signature that does not fit a target type) can be turned into a
//! [`Diagnostic`]:
//! - Error codes for searchability
//! - A one-line message (what went wrong)
//! - An optional labeled span into the signature text (where)
//! - Notes (the path inside the signature, candidate arities)
//! - Suggestions (how to fix)
//!
//! ```text
//! error[E1001]: primitive kind mismatch: expected `boolean`, found `float`
//!   = note: at `tom[]`
//!   = help: declare the argument as `float`
//! ```

mod diagnostic;
mod error_code;
mod span;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use span::Span;
