//! `Range(first, last)` (spec §4.E) — `A to B`. Has no value by itself; only
//! `apply` is meaningful, and its six comparison cases are intentionally
//! asymmetric (`x > A to B` means "past the whole range").

use crate::apply::apply_binary;
use crate::ast::{BinOp, Expr, ExprValue};
use crate::error::Span;
use crate::fragment::error_for;
use crate::translate::{self, Ctx};

pub fn translate(e: &Expr, ctx: &mut Ctx) -> ExprValue {
    ctx.diagnostics.log(e.span, "Range has no value");
    error_for()
}

pub fn apply(e: &Expr, first: &Expr, last: &Expr, ctx: &mut Ctx, op: BinOp, other: &Expr) -> ExprValue {
    let other_v = translate::translate(other, ctx);
    let first_v = translate::translate(first, ctx);
    let last_v = translate::translate(last, ctx);
    let element_type = e.element_type();

    match op {
        BinOp::Eq => {
            let lo = compare(ctx, &element_type, e.span, &other_v, BinOp::Ge, &first_v);
            let hi = compare(ctx, &element_type, e.span, &other_v, BinOp::Lt, &last_v);
            combine_and(ctx, &element_type, e.span, lo, hi)
        }
        BinOp::Ne => {
            let lo = compare(ctx, &element_type, e.span, &other_v, BinOp::Lt, &first_v);
            let hi = compare(ctx, &element_type, e.span, &other_v, BinOp::Ge, &last_v);
            combine_or(ctx, &element_type, e.span, lo, hi)
        }
        BinOp::Gt => compare(ctx, &element_type, e.span, &other_v, BinOp::Ge, &last_v),
        BinOp::Ge => compare(ctx, &element_type, e.span, &other_v, BinOp::Ge, &first_v),
        BinOp::Lt => compare(ctx, &element_type, e.span, &other_v, BinOp::Lt, &first_v),
        BinOp::Le => compare(ctx, &element_type, e.span, &other_v, BinOp::Lt, &last_v),
        _ => {
            ctx.diagnostics.log(
                e.span,
                format!("'{element_type}' Can't use type {}", other_v.data_type),
            );
            error_for()
        }
    }
}

fn compare(
    ctx: &mut Ctx,
    element_type: &str,
    span: Option<Span>,
    l: &ExprValue,
    op: BinOp,
    r: &ExprValue,
) -> ExprValue {
    apply_binary(element_type, span, l, op, r, ctx.diagnostics)
}

fn combine_and(ctx: &mut Ctx, element_type: &str, span: Option<Span>, l: ExprValue, r: ExprValue) -> ExprValue {
    crate::apply::apply_bool(element_type, span, &l, crate::ast::BoolOp::And, &r, ctx.diagnostics)
}

fn combine_or(ctx: &mut Ctx, element_type: &str, span: Option<Span>, l: ExprValue, r: ExprValue) -> ExprValue {
    crate::apply::apply_bool(element_type, span, &l, crate::ast::BoolOp::Or, &r, ctx.diagnostics)
}
