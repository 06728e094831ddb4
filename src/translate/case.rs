//! `ExprCase(whens, else?)` (spec §4.E) — standard SQL
//! `CASE WHEN … THEN … ELSE … END`.

use crate::ast::{CaseWhen, DataType, Expr, ExprValue};
use crate::fragment::{error_for, Fragment};
use crate::translate::{self, Ctx};
use crate::typecheck::{shapes, type_check};

pub fn translate(e: &Expr, whens: &[CaseWhen], else_: Option<&Expr>, ctx: &mut Ctx) -> ExprValue {
    let boolean = shapes(&[DataType::Boolean]);
    let mut aggregate = false;
    let mut any_error = false;
    let mut arms = Vec::with_capacity(whens.len());

    for w in whens {
        let cond = translate::translate(&w.when, ctx);
        type_check(&e.element_type(), e.span, &cond, &boolean, ctx.diagnostics);
        let then_v = translate::translate(&w.then, ctx);
        any_error = any_error || cond.is_error() || then_v.is_error();
        aggregate = aggregate || cond.aggregate || then_v.aggregate;
        arms.push((cond, then_v));
    }

    let else_v = else_.map(|x| translate::translate(x, ctx));
    if let Some(v) = &else_v {
        any_error = any_error || v.is_error();
        aggregate = aggregate || v.aggregate;
    }

    if any_error {
        return error_for();
    }

    let result_type = arms
        .iter()
        .map(|(_, t)| t)
        .chain(else_v.iter())
        .find(|v| v.data_type != DataType::Null)
        .map(|v| v.data_type);

    let Some(result_type) = result_type else {
        ctx.diagnostics.log(e.span, "case statement type not computable");
        return error_for();
    };

    let mismatched = arms
        .iter()
        .map(|(_, t)| t)
        .chain(else_v.iter())
        .any(|v| v.data_type != DataType::Null && v.data_type != result_type);
    if mismatched {
        ctx.diagnostics.log(e.span, "Mismatched case/when clause types");
        return error_for();
    }

    let mut value = vec![Fragment::text("CASE")];
    for (cond, then_v) in &arms {
        value.push(Fragment::text(" WHEN "));
        value.extend(cond.value.iter().cloned());
        value.push(Fragment::text(" THEN "));
        value.extend(then_v.value.iter().cloned());
    }
    if let Some(v) = &else_v {
        value.push(Fragment::text(" ELSE "));
        value.extend(v.value.iter().cloned());
    }
    value.push(Fragment::text(" END"));

    ExprValue::new(result_type, aggregate, value)
}
