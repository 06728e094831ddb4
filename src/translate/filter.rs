//! `ExprFilter(e, conditions)` (spec §4.E): restricts an aggregate to rows
//! matching `conditions`. A no-op over a non-aggregate expression.

use crate::ast::{DataType, Expr, ExprValue};
use crate::field_space::FilterCond;
use crate::fragment::{error_for, Fragment};
use crate::translate::{self, Ctx};
use crate::typecheck::{shapes, type_check};

pub fn translate(e: &Expr, inner: &Expr, conditions: &[Expr], ctx: &mut Ctx) -> ExprValue {
    let inner_v = translate::translate(inner, ctx);
    if inner_v.is_error() {
        return inner_v;
    }

    let boolean = shapes(&[DataType::Boolean]);
    let mut filter_list = Vec::with_capacity(conditions.len());
    let mut any_error = false;

    for cond in conditions {
        let cv = translate::translate(cond, ctx);
        if cv.is_error() {
            any_error = true;
            continue;
        }
        if !type_check(&e.element_type(), e.span, &cv, &boolean, ctx.diagnostics) {
            any_error = true;
            continue;
        }
        if cv.aggregate {
            ctx.diagnostics
                .log(e.span, "Cannot filter a field with an aggregate computation");
            any_error = true;
            continue;
        }
        filter_list.push(FilterCond {
            value: cv.value,
            aggregate: false,
        });
    }

    if any_error {
        return error_for();
    }

    if !inner_v.aggregate {
        return inner_v;
    }

    let value = vec![Fragment::FilterExpression {
        e: inner_v.value,
        filter_list,
    }];
    ExprValue::new(inner_v.data_type, inner_v.aggregate, value).with_timeframe(inner_v.timeframe)
}
