//! The public compiler entry (spec §4.G): given an AST root and a
//! `FieldSpace`, returns the fragment sequence plus diagnostics.

use crate::ast::{Expr, ExprValue};
use crate::error::Diagnostics;
use crate::field_space::FieldSpace;
use crate::fragment::compress;
use crate::translate::{self, Ctx};

/// Tunable knobs for a compilation. Currently empty — the seam a future
/// caller would extend without breaking [`compile_expression`]'s signature,
/// mirroring the teacher's `sql::Options`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {}

/// The result of compiling one expression tree: its value and every
/// diagnostic recorded along the way.
#[derive(Debug, Clone)]
pub struct CompileResult {
    pub value: ExprValue,
    pub diagnostics: Diagnostics,
}

/// Compiles `root` against `field_space`, using default [`CompileOptions`].
pub fn compile_expression(root: &Expr, field_space: &dyn FieldSpace) -> CompileResult {
    compile_expression_with(root, field_space, CompileOptions::default())
}

/// Compiles `root` against `field_space`. Walks the tree once; the result's
/// fragment sequence is compressed before being returned.
pub fn compile_expression_with(
    root: &Expr,
    field_space: &dyn FieldSpace,
    _options: CompileOptions,
) -> CompileResult {
    log::debug!("compile_expression: entering");
    let mut diagnostics = Diagnostics::new();
    let mut value = {
        let mut ctx = Ctx::new(field_space, &mut diagnostics);
        translate::translate(root, &mut ctx)
    };
    value.value = compress(&value.value);
    log::debug!(
        "compile_expression: leaving ({} diagnostic(s))",
        diagnostics.len()
    );
    CompileResult { value, diagnostics }
}
