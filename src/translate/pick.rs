//! `Pick(choices, else?)` / `PickWhen(pick?, when)` (spec §4.E) — two-modal:
//! value mode (a standalone `CASE`) and apply mode (each `when` compared
//! against the right-hand operand of a binary node).

use crate::ast::{BinOp, DataType, Expr, ExprValue, PickWhen};
use crate::fragment::{error_for, Fragment};
use crate::translate::{self, Ctx};
use crate::typecheck::{shapes, type_check};

pub fn translate(e: &Expr, choices: &[PickWhen], else_: Option<&Expr>, ctx: &mut Ctx) -> ExprValue {
    match value_mode(e, choices, else_, ctx) {
        Some(v) => v,
        None => {
            ctx.diagnostics.log(e.span, "Pick has no value");
            error_for()
        }
    }
}

pub fn request_translation(e: &Expr, choices: &[PickWhen], else_: Option<&Expr>, ctx: &mut Ctx) -> Option<ExprValue> {
    value_mode(e, choices, else_, ctx)
}

/// Value mode is legal only when `else` is present and every `when` is a
/// full value-bearing expression — and, since there's no `other` to default
/// to outside apply mode, every `pick` must be given explicitly too.
fn value_mode(e: &Expr, choices: &[PickWhen], else_: Option<&Expr>, ctx: &mut Ctx) -> Option<ExprValue> {
    let else_expr = else_?;
    if choices.iter().any(|c| c.pick.is_none()) {
        return None;
    }

    let boolean = shapes(&[DataType::Boolean]);
    let mut aggregate = false;
    let mut arms = Vec::with_capacity(choices.len());

    for choice in choices {
        let when_v = translate::request_translation(&choice.when, ctx)?;
        type_check(&e.element_type(), e.span, &when_v, &boolean, ctx.diagnostics);
        let pick_v = translate::translate(choice.pick.as_ref().expect("checked above"), ctx);
        aggregate = aggregate || when_v.aggregate || pick_v.aggregate;
        arms.push((when_v, pick_v));
    }

    let else_v = translate::translate(else_expr, ctx);
    aggregate = aggregate || else_v.aggregate;

    Some(finish(e, ctx, arms, else_v, aggregate))
}

/// `apply(fs, op, other)`: each `when` is compared via `when.apply(fs, "=",
/// other)` regardless of the outer `op` (spec's literal phrasing for this
/// contract); each `pick` is the then-branch, defaulting to `other` when
/// omitted, and `else` defaults to `other` too.
pub fn apply(
    e: &Expr,
    choices: &[PickWhen],
    else_: Option<&Expr>,
    ctx: &mut Ctx,
    _op: BinOp,
    other: &Expr,
) -> ExprValue {
    let boolean = shapes(&[DataType::Boolean]);
    let mut aggregate = false;
    let mut arms = Vec::with_capacity(choices.len());

    for choice in choices {
        let when_v = translate::apply(&choice.when, ctx, BinOp::Eq, other);
        type_check(&e.element_type(), e.span, &when_v, &boolean, ctx.diagnostics);
        let pick_v = match &choice.pick {
            Some(p) => translate::translate(p, ctx),
            None => translate::translate(other, ctx),
        };
        aggregate = aggregate || when_v.aggregate || pick_v.aggregate;
        arms.push((when_v, pick_v));
    }

    let else_v = match else_ {
        Some(x) => translate::translate(x, ctx),
        None => translate::translate(other, ctx),
    };
    aggregate = aggregate || else_v.aggregate;

    finish(e, ctx, arms, else_v, aggregate)
}

fn finish(e: &Expr, ctx: &mut Ctx, arms: Vec<(ExprValue, ExprValue)>, else_v: ExprValue, aggregate: bool) -> ExprValue {
    if arms.iter().any(|(w, p)| w.is_error() || p.is_error()) || else_v.is_error() {
        return error_for();
    }

    if arms.iter().any(|(_, p)| !p.loose_type_eq(&else_v)) {
        ctx.diagnostics.log(e.span, "Mismatched pick clause types");
        return error_for();
    }

    let mut value = vec![Fragment::text("CASE")];
    for (when_v, pick_v) in &arms {
        value.push(Fragment::text(" WHEN "));
        value.extend(when_v.value.iter().cloned());
        value.push(Fragment::text(" THEN "));
        value.extend(pick_v.value.iter().cloned());
    }
    value.push(Fragment::text(" ELSE "));
    value.extend(else_v.value.iter().cloned());
    value.push(Fragment::text(" END"));

    ExprValue::new(else_v.data_type, aggregate, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DataType, ExprKind};
    use crate::error::Diagnostics;
    use crate::field_space::{FieldEntry, MapFieldSpace};
    use crate::fragment::Fragment;

    #[test]
    fn value_mode_builds_a_case_expression() {
        let fs = MapFieldSpace::new();
        let mut diags = Diagnostics::new();
        let choices = vec![PickWhen {
            pick: Some(Box::new(Expr::new(ExprKind::ExprNumber("1".into())))),
            when: Box::new(Expr::new(ExprKind::Boolean(true))),
        }];
        let else_ = Expr::new(ExprKind::ExprNumber("0".into()));
        let e = Expr::new(ExprKind::Pick {
            choices: choices.clone(),
            else_: Some(Box::new(else_.clone())),
        });
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = translate(&e, &choices, Some(&else_), &mut ctx);
        assert_eq!(got.data_type, DataType::Number);
        assert_eq!(
            got.value,
            vec![
                Fragment::text("CASE"),
                Fragment::text(" WHEN "),
                Fragment::text("true"),
                Fragment::text(" THEN "),
                Fragment::text("1"),
                Fragment::text(" ELSE "),
                Fragment::text("0"),
                Fragment::text(" END"),
            ]
        );
    }

    #[test]
    fn value_mode_without_else_is_denied() {
        let fs = MapFieldSpace::new();
        let mut diags = Diagnostics::new();
        let choices = vec![PickWhen {
            pick: Some(Box::new(Expr::new(ExprKind::ExprNumber("1".into())))),
            when: Box::new(Expr::new(ExprKind::Boolean(true))),
        }];
        let e = Expr::new(ExprKind::Pick {
            choices: choices.clone(),
            else_: None,
        });
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = translate(&e, &choices, None, &mut ctx);
        assert!(got.is_error());
        assert!(diags.iter().next().unwrap().message.contains("no value"));
    }

    #[test]
    fn apply_mode_defaults_pick_and_else_to_other() {
        let fs = MapFieldSpace::new().with_field("x", FieldEntry::scalar(DataType::Number, false));
        let mut diags = Diagnostics::new();
        let choices = vec![PickWhen {
            pick: None,
            when: Box::new(Expr::new(ExprKind::Boolean(true))),
        }];
        let other = Expr::new(ExprKind::ExprField("x".into()));
        let e = Expr::new(ExprKind::Pick {
            choices: choices.clone(),
            else_: None,
        });
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = apply(&e, &choices, None, &mut ctx, BinOp::Eq, &other);
        assert_eq!(got.data_type, DataType::Number);
        assert!(!got.is_error());
    }
}
