//! Expression AST and its value-type algebra.

pub mod expr;
pub mod ident;
pub mod types;

pub use expr::*;
pub use ident::FieldPath;
pub use types::{DataType, ExprValue, Timeframe};
