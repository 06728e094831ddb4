//! `ExprAlternationTree(l, op, r)` (spec §4.E) — `a | b` / `a & b`. Has no
//! value by itself; only `apply` is meaningful.

use crate::apply::apply_bool;
use crate::ast::{AltOp, BinOp, BoolOp, Expr, ExprValue};
use crate::fragment::error_for;
use crate::translate::{self, Ctx};

pub fn translate(e: &Expr, ctx: &mut Ctx) -> ExprValue {
    ctx.diagnostics.log(e.span, "Alternation tree has no value");
    error_for()
}

/// Distributes: `(other applyOp l) ⊕ (other applyOp r)`, where `⊕` is `or`
/// for `|` and `and` for `&`. Each branch is composed through the same
/// right-biased `apply` so a branch that is itself partial still works.
pub fn apply(e: &Expr, l: &Expr, op: AltOp, r: &Expr, ctx: &mut Ctx, apply_op: BinOp, other: &Expr) -> ExprValue {
    let left = translate::apply(l, ctx, apply_op, other);
    let right = translate::apply(r, ctx, apply_op, other);
    let bool_op = match op {
        AltOp::Or => BoolOp::Or,
        AltOp::And => BoolOp::And,
    };
    apply_bool(&e.element_type(), e.span, &left, bool_op, &right, ctx.diagnostics)
}
