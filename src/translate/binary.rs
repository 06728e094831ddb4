//! `BinaryNumeric` and `BinaryBoolean` (spec §4.E).

use crate::apply::apply_bool;
use crate::ast::{BinOp, BoolOp, Expr, ExprValue};
use crate::translate::{self, Ctx};

/// `BinaryNumeric(l, op, r)`: dispatched right-biased through `apply` —
/// `r.apply(fs, op, l)` — so alternation/range/pick sitting on the right can
/// override composition.
pub fn translate_numeric(l: &Expr, op: BinOp, r: &Expr, ctx: &mut Ctx) -> ExprValue {
    translate::apply(r, ctx, op, l)
}

/// `BinaryBoolean(l, op, r)`: composed directly, with no right-biased
/// dispatch — `and`/`or` never need the partial-expression override.
pub fn translate_boolean(e: &Expr, l: &Expr, op: BoolOp, r: &Expr, ctx: &mut Ctx) -> ExprValue {
    let left = translate::translate(l, ctx);
    let right = translate::translate(r, ctx);
    apply_bool(&e.element_type(), e.span, &left, op, &right, ctx.diagnostics)
}
