//! The Translate contract (spec §4.E, §9 "deep inheritance hierarchy →
//! tagged union"): a single match dispatcher over [`ExprKind`] rather than a
//! virtual method per node type. Each node family gets its own file; this
//! module only wires the match arms together.

mod aggregate;
mod alternation;
mod binary;
mod case;
mod cast;
mod field;
mod filter;
mod literal;
mod pick;
mod range;
mod unary;

use crate::ast::{BinOp, Expr, ExprKind};
use crate::ast::types::ExprValue;
use crate::error::Diagnostics;
use crate::field_space::FieldSpace;

/// The state threaded through every translation call: the external name
/// resolver and the diagnostics sink, mirroring the teacher's `ctx`-threading
/// convention (`sql/gen_expr.rs`, `sql/operators.rs`).
pub struct Ctx<'a> {
    pub fs: &'a dyn FieldSpace,
    pub diagnostics: &'a mut Diagnostics,
}

impl<'a> Ctx<'a> {
    pub fn new(fs: &'a dyn FieldSpace, diagnostics: &'a mut Diagnostics) -> Self {
        Ctx { fs, diagnostics }
    }
}

/// `translation`: produce this node's value, recording diagnostics rather
/// than aborting. Partial nodes (range, alternation tree, pick without else)
/// report their own "has no value" diagnostic here — `request_translation`
/// is the silent counterpart used by callers that can tolerate denial.
pub fn translate(e: &Expr, ctx: &mut Ctx) -> ExprValue {
    match &e.kind {
        ExprKind::ExprString(_)
        | ExprKind::ExprNumber(_)
        | ExprKind::ExprRegEx(_)
        | ExprKind::ExprTime { .. }
        | ExprKind::Boolean(_)
        | ExprKind::ExprNULL => literal::translate(e, ctx),

        ExprKind::ExprField(name) => field::translate(e, name, ctx),

        ExprKind::ExprParens(inner) => unary::translate_parens(inner, ctx),
        ExprKind::ExprMinus(inner) => unary::translate_minus(e, inner, ctx),
        ExprKind::ExprNot(inner) => unary::translate_not(e, inner, ctx),

        ExprKind::BinaryNumeric(l, op, r) => binary::translate_numeric(l, *op, r, ctx),
        ExprKind::BinaryBoolean(l, op, r) => binary::translate_boolean(e, l, *op, r, ctx),

        ExprKind::ExprAlternationTree(..) => alternation::translate(e, ctx),
        ExprKind::Range(..) => range::translate(e, ctx),

        ExprKind::ExprCase { whens, else_ } => case::translate(e, whens, else_.as_deref(), ctx),
        ExprKind::Pick { choices, else_ } => pick::translate(e, choices, else_.as_deref(), ctx),

        ExprKind::ExprCast { expr, to, safe } => cast::translate(expr, *to, *safe, ctx),
        ExprKind::ExprFilter { expr, conditions } => filter::translate(e, expr, conditions, ctx),

        ExprKind::ExprAggregateFunction(agg) => aggregate::translate(e, agg, ctx),
    }
}

/// `apply(fs, op, other)`: compose `e` (the right-hand node) against `other`
/// (the left-hand node) under `op`. Most nodes use the default — translate
/// both sides and hand them to `applyBinary` — but ranges, alternation
/// trees, and picks override it to implement partial-expression semantics.
pub fn apply(e: &Expr, ctx: &mut Ctx, op: BinOp, other: &Expr) -> ExprValue {
    match &e.kind {
        ExprKind::ExprParens(inner) => apply(inner, ctx, op, other),
        ExprKind::ExprAlternationTree(l, alt_op, r) => {
            alternation::apply(e, l, *alt_op, r, ctx, op, other)
        }
        ExprKind::Range(first, last) => range::apply(e, first, last, ctx, op, other),
        ExprKind::Pick { choices, else_ } => {
            pick::apply(e, choices, else_.as_deref(), ctx, op, other)
        }
        _ => default_apply(e, ctx, op, other),
    }
}

fn default_apply(e: &Expr, ctx: &mut Ctx, op: BinOp, other: &Expr) -> ExprValue {
    let left = translate(other, ctx);
    let right = translate(e, ctx);
    crate::apply::apply_binary(&e.element_type(), e.span, &left, op, &right, ctx.diagnostics)
}

/// `requestTranslation`: `Some(value)` when `e` can stand alone as a value;
/// `None` (denial) when it's a partial expression. Represented as an
/// `Option`, never overloaded onto an `error`-typed value (spec §9
/// "Partial-expression polymorphism").
pub fn request_translation(e: &Expr, ctx: &mut Ctx) -> Option<ExprValue> {
    match &e.kind {
        ExprKind::ExprParens(inner) => request_translation(inner, ctx),
        ExprKind::ExprAlternationTree(..) => None,
        ExprKind::Range(..) => None,
        ExprKind::Pick { choices, else_ } => pick::request_translation(e, choices, else_.as_deref(), ctx),
        _ => Some(translate(e, ctx)),
    }
}
