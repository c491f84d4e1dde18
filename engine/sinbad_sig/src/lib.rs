//! Signature model for the Sinbad binding engine.
//!
//! Binding loosely-typed data (JSON, CSV, XML values) to typed constructors
//! starts from two descriptions that this crate defines:
//!
//! - [`Signature`]: what the data is declared to look like. Built once, by
//!   hand or from a literal (`ClassA(name: string, tags: [string])`), and
//!   unified many times.
//! - [`Shape`]: what a receiving type concretely is (a primitive, an array,
//!   a sequence, or an object built by one of its constructors).
//!
//! The [`TypeCatalog`] trait supplies the constructors of object shapes, and
//! the [widening table](widens) says which primitive kinds may stand in for
//! which. Unification itself lives in `sinbad_unify`.

mod catalog;
mod name;
mod parse;
mod prim;
mod shape;
mod signature;

pub use catalog::{Constructor, ConstructorRef, Param, TypeCatalog, TypeDescriptor, TypeRegistry};
pub use name::TypeName;
pub use parse::ParseError;
pub use prim::{widens, PrimKind};
pub use shape::Shape;
pub use signature::{ArgSpec, CompositeSig, Signature};
