//! `ExprAggregateFunction` (spec §4.E): `count`, `count_distinct`, `sum`,
//! `avg`, `min`, `max`. Handles `source` locality (`structPath`) and the
//! `sum`/`avg` asymmetric default-naming rule.

use itertools::Itertools;
use once_cell::sync::Lazy;

use crate::ast::ident::FieldPath;
use crate::ast::{AggFunc, AggregateFunction, DataType, Expr, ExprKind, ExprValue};
use crate::fragment::{error_for, Fragment};
use crate::translate::{self, Ctx};
use crate::typecheck::{type_check, TypeShape};

/// `legalChildTypes` per aggregate function (spec §4.E table). `count` takes
/// no child at all, matching the teacher's `once_cell`-backed static tables
/// (`sql/operators.rs`'s `STD`) rather than recomputing this on every call.
static LEGAL_CHILD_TYPES: Lazy<[(AggFunc, &'static [DataType]); 6]> = Lazy::new(|| {
    use DataType::*;
    [
        (AggFunc::Count, &[] as &[DataType]),
        (AggFunc::CountDistinct, &[Number, String, Date, Timestamp]),
        (AggFunc::Sum, &[Number]),
        (AggFunc::Avg, &[Number]),
        (AggFunc::Min, &[Number, String, Date, Timestamp]),
        (AggFunc::Max, &[Number, String, Date, Timestamp]),
    ]
});

fn legal_child_types(func: AggFunc) -> &'static [DataType] {
    LEGAL_CHILD_TYPES
        .iter()
        .find(|(f, _)| *f == func)
        .map(|(_, types)| *types)
        .unwrap_or(&[])
}

fn returns(func: AggFunc, child: DataType) -> DataType {
    match func {
        AggFunc::Count | AggFunc::CountDistinct | AggFunc::Sum | AggFunc::Avg => DataType::Number,
        AggFunc::Min | AggFunc::Max => child,
    }
}

pub fn translate(e: &Expr, agg: &AggregateFunction, ctx: &mut Ctx) -> ExprValue {
    let mut struct_path: Option<String> = None;
    let mut default_name: Option<String> = None;

    let inner_expr: Option<Expr> = if let Some(expr) = &agg.expr {
        Some((**expr).clone())
    } else if let Some(source) = &agg.source {
        match resolve_source(e, agg.func, source, ctx) {
            Ok(Some((expr, sp, name))) => {
                struct_path = sp;
                default_name = name;
                Some(expr)
            }
            Ok(None) => None,
            Err(()) => return error_for(),
        }
    } else {
        None
    };

    let Some(inner_expr) = inner_expr else {
        if agg.func == AggFunc::Count {
            return bare_count();
        }
        ctx.diagnostics.log(e.span, "Missing expression for aggregate function");
        return error_for();
    };

    let inner_v = translate::translate(&inner_expr, ctx);
    if inner_v.is_error() {
        return error_for();
    }

    let legal = legal_child_types(agg.func);
    if legal.is_empty() {
        // `count(x)` has no type restriction, but an aggregate of an
        // aggregate is still illegal.
        if inner_v.aggregate {
            ctx.diagnostics.log(
                e.span,
                format!("'{}' Can't use type {}", e.element_type(), inner_v.data_type),
            );
            return error_for();
        }
    } else {
        let shapes: Vec<TypeShape> = legal.iter().map(|dt| TypeShape::non_aggregate(*dt)).collect_vec();
        if !type_check(&e.element_type(), e.span, &inner_v, &shapes, ctx.diagnostics) {
            return error_for();
        }
    }

    let data_type = returns(agg.func, inner_v.data_type);
    let value = vec![Fragment::Aggregate {
        function: agg.func.to_string(),
        e: inner_v.value,
        struct_path,
        name: default_name,
    }];
    ExprValue::new(data_type, true, value)
}

fn bare_count() -> ExprValue {
    let value = vec![Fragment::Aggregate {
        function: AggFunc::Count.to_string(),
        e: Vec::new(),
        struct_path: None,
        name: None,
    }];
    ExprValue::new(DataType::Number, true, value)
}

/// Resolves an aggregate's `source` field path: an atomic field becomes the
/// default expression (with its leaf stripped into `structPath`); a struct
/// field is a diagnosable error (spec §9 Open Question (a)).
#[allow(clippy::type_complexity)]
fn resolve_source(
    e: &Expr,
    func: AggFunc,
    source: &str,
    ctx: &mut Ctx,
) -> Result<Option<(Expr, Option<String>, Option<String>)>, ()> {
    let Some(entry) = ctx.fs.field(source) else {
        ctx.diagnostics
            .log(e.span, format!("Reference to undefined field '{source}'"));
        return Err(());
    };

    if entry.is_struct {
        ctx.diagnostics
            .log(e.span, "Cannot aggregate a struct directly; specify a field");
        return Err(());
    }

    let path = FieldPath::from_dotted(source);
    let (struct_path, leaf) = path.split_leaf();
    let default_name = match func {
        AggFunc::Sum => Some(format!("total_{leaf}")),
        AggFunc::Avg => Some(format!("avg_{leaf}")),
        _ => None,
    };

    Ok(Some((
        Expr::new(ExprKind::ExprField(source.to_string())),
        struct_path,
        default_name,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Diagnostics;
    use crate::field_space::{FieldEntry, MapFieldSpace};

    fn agg(func: AggFunc, expr: Option<Expr>, source: Option<&str>) -> AggregateFunction {
        AggregateFunction {
            func,
            expr: expr.map(Box::new),
            source: source.map(str::to_string),
        }
    }

    #[test]
    fn sum_of_aggregate_field_is_illegal() {
        let fs = MapFieldSpace::new().with_field("sold", FieldEntry::scalar(DataType::Number, true));
        let mut diags = Diagnostics::new();
        let a = agg(AggFunc::Sum, Some(Expr::new(ExprKind::ExprField("sold".into()))), None);
        let e = Expr::new(ExprKind::ExprAggregateFunction(a.clone()));
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = translate(&e, &a, &mut ctx);
        assert!(got.is_error());
        assert!(diags.iter().next().unwrap().message.contains("Can't use type"));
    }

    #[test]
    fn sum_over_named_source_gets_a_default_name_and_struct_path() {
        let fs = MapFieldSpace::new()
            .with_field("orders.amount", FieldEntry::scalar(DataType::Number, false));
        let mut diags = Diagnostics::new();
        let a = agg(AggFunc::Sum, None, Some("orders.amount"));
        let e = Expr::new(ExprKind::ExprAggregateFunction(a.clone()));
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = translate(&e, &a, &mut ctx);
        assert!(!got.is_error());
        match &got.value[0] {
            Fragment::Aggregate { struct_path, name, .. } => {
                assert_eq!(struct_path.as_deref(), Some("orders"));
                assert_eq!(name.as_deref(), Some("total_amount"));
            }
            other => panic!("expected an aggregate fragment, got {other:?}"),
        }
    }

    #[test]
    fn aggregating_a_struct_source_is_a_diagnosable_error() {
        let fs = MapFieldSpace::new().with_field("orders", FieldEntry::struct_ref());
        let mut diags = Diagnostics::new();
        let a = agg(AggFunc::Sum, None, Some("orders"));
        let e = Expr::new(ExprKind::ExprAggregateFunction(a.clone()));
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = translate(&e, &a, &mut ctx);
        assert!(got.is_error());
        assert!(diags.iter().next().unwrap().message.contains("struct"));
    }

    #[test]
    fn bare_count_needs_no_expression() {
        let fs = MapFieldSpace::new();
        let mut diags = Diagnostics::new();
        let a = agg(AggFunc::Count, None, None);
        let e = Expr::new(ExprKind::ExprAggregateFunction(a.clone()));
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = translate(&e, &a, &mut ctx);
        assert!(!got.is_error());
        assert!(diags.is_empty());
        assert_eq!(got.data_type, DataType::Number);
    }

    #[test]
    fn min_preserves_child_type() {
        let fs = MapFieldSpace::new().with_field("d", FieldEntry::scalar(DataType::Date, false));
        let mut diags = Diagnostics::new();
        let a = agg(AggFunc::Min, Some(Expr::new(ExprKind::ExprField("d".into()))), None);
        let e = Expr::new(ExprKind::ExprAggregateFunction(a.clone()));
        let mut ctx = Ctx::new(&fs, &mut diags);
        let got = translate(&e, &a, &mut ctx);
        assert_eq!(got.data_type, DataType::Date);
    }
}
