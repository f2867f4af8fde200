//! # Pattern Module
//!
//! Compiles route pattern strings into the pieces the radix tree stores.
//!
//! ## Syntax
//!
//! | Syntax          | Meaning                                                        |
//! |-----------------|----------------------------------------------------------------|
//! | literal text    | matched verbatim                                               |
//! | `:name`         | one path segment, bound to `name`                              |
//! | `:name(expr)`   | one path segment that must fully match regex `expr`            |
//! | `:name?`        | optional: shorter variants without this segment are registered |
//! | `*name`         | remainder of the path (must be last), bound to `name`          |
//!
//! Names start with an ASCII letter and continue with letters, digits or `_`.
//! A parameter must be followed by `/` or the end of the pattern.
//!
//! ## Flow
//!
//! [`compile`] validates the pattern and yields a [`CompiledPattern`];
//! [`CompiledPattern::expand`] turns optional segments into the list of
//! [`ConcretePattern`]s that are inserted one by one.

mod constraint;
mod expand;
mod parser;

pub use constraint::Constraint;
pub use expand::ConcretePattern;
pub use parser::{compile, CompiledPattern, Piece, SegmentKind, WildcardSegment};
