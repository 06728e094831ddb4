//! `ExprField(name)` (spec §4.E): resolves `name` against the `FieldSpace`.

use crate::ast::{Expr, ExprValue};
use crate::fragment::{error_for, Fragment};
use crate::translate::Ctx;

pub fn translate(e: &Expr, name: &str, ctx: &mut Ctx) -> ExprValue {
    match ctx.fs.field(name) {
        Some(entry) => ExprValue::new(entry.ty.data_type, entry.ty.aggregate, vec![Fragment::field(name)]),
        None => {
            ctx.diagnostics
                .log(e.span, format!("Reference to undefined field '{name}'"));
            error_for()
        }
    }
}
