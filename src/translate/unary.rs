//! `ExprParens`, `ExprMinus`, `ExprNot` (spec §4.E).

use crate::ast::{DataType, Expr, ExprValue};
use crate::apply::nullsafe_not;
use crate::fragment::{error_for, Fragment};
use crate::translate::{self, Ctx};
use crate::typecheck::{shapes, type_check};

/// `ExprParens(e)`: translation wraps in literal parens; `apply` and
/// `requestTranslation` are transparent (forward to `inner`, handled by the
/// dispatcher in `translate::mod`).
pub fn translate_parens(inner: &Expr, ctx: &mut Ctx) -> ExprValue {
    let v = translate::translate(inner, ctx);
    if v.is_error() {
        return v;
    }

    let mut value = Vec::with_capacity(v.value.len() + 2);
    value.push(Fragment::text("("));
    value.extend(v.value.iter().cloned());
    value.push(Fragment::text(")"));
    ExprValue { value, ..v }
}

/// `ExprMinus(e)`: requires numeric. A multi-fragment inner gets defensive
/// parens (`-(...)`); a single fragment is prefixed directly (`-x`).
pub fn translate_minus(e: &Expr, inner: &Expr, ctx: &mut Ctx) -> ExprValue {
    let v = translate::translate(inner, ctx);
    let numeric = shapes(&[DataType::Number]);
    if !type_check(&e.element_type(), e.span, &v, &numeric, ctx.diagnostics) {
        return error_for();
    }

    let mut value = Vec::with_capacity(v.value.len() + 2);
    if v.value.len() > 1 {
        value.push(Fragment::text("-("));
        value.extend(v.value.iter().cloned());
        value.push(Fragment::text(")"));
    } else {
        value.push(Fragment::text("-"));
        value.extend(v.value.iter().cloned());
    }
    ExprValue::new(DataType::Number, v.aggregate, value)
}

/// `ExprNot(e)`: requires boolean or null; emits `nullsafeNot(e)`.
pub fn translate_not(e: &Expr, inner: &Expr, ctx: &mut Ctx) -> ExprValue {
    let v = translate::translate(inner, ctx);
    let legal = shapes(&[DataType::Boolean, DataType::Null]);
    if !type_check(&e.element_type(), e.span, &v, &legal, ctx.diagnostics) {
        return error_for();
    }

    ExprValue::new(DataType::Boolean, v.aggregate, nullsafe_not(&v.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinOp, ExprKind};
    use crate::error::Diagnostics;
    use crate::field_space::MapFieldSpace;

    #[test]
    fn minus_wraps_multi_fragment_inner_in_parens() {
        let fs = MapFieldSpace::new();
        let mut diags = Diagnostics::new();
        let inner = Expr::new(ExprKind::BinaryNumeric(
            Box::new(Expr::new(ExprKind::ExprNumber("1".into()))),
            BinOp::Add,
            Box::new(Expr::new(ExprKind::ExprNumber("2".into()))),
        ));
        let e = Expr::new(ExprKind::ExprMinus(Box::new(inner)));
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = translate::translate(&e, &mut ctx);
        assert_eq!(got.data_type, DataType::Number);
        assert_eq!(got.value.first(), Some(&Fragment::text("-(")));
    }

    #[test]
    fn not_on_non_boolean_is_a_type_error() {
        let fs = MapFieldSpace::new();
        let mut diags = Diagnostics::new();
        let inner = Expr::new(ExprKind::ExprNumber("1".into()));
        let e = Expr::new(ExprKind::ExprNot(Box::new(inner)));
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = translate::translate(&e, &mut ctx);
        assert!(got.is_error());
        assert!(!diags.is_empty());
    }
}
