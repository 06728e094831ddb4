//! Expression compilation core for a relational-analytics modeling language.
//!
//! Lowers a typed expression tree ([`ast`]) into a SQL *fragment sequence* —
//! an ordered mix of literal text and structured placeholders (field
//! references, aggregate calls, filtered-expression nodes) that a
//! downstream, out-of-scope code generator splices into dialect-specific
//! SQL. Name resolution, parsing, and SQL dialect emission are external
//! collaborators; this crate depends only on the [`FieldSpace`] trait for
//! the former and produces the fragment ABI described in [`fragment`] for
//! the latter.
//!
//! Start with [`compile_expression`].

pub mod apply;
pub mod ast;
pub mod compiler;
pub mod error;
pub mod field_space;
pub mod fragment;
pub mod translate;
pub mod typecheck;

pub use ast::types::{DataType, ExprValue, Timeframe};
pub use compiler::{compile_expression, compile_expression_with, CompileOptions, CompileResult};
pub use error::{Diagnostic, Diagnostics, Span};
pub use field_space::{FieldEntry, FieldSpace, FieldType, FilterCond, MapFieldSpace};
pub use fragment::{compose, compress, error_for, Fragment, FragmentSeq};
