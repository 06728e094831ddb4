//! End-to-end tests against the public `compile_expression` entry point,
//! covering the scenarios in spec §8 (S1-S6) and the error taxonomy in §7.

use malloy_expr_compiler::ast::{
    AggFunc, AggregateFunction, BinOp, Expr, ExprKind, PickWhen, TimeKind,
};
use malloy_expr_compiler::field_space::{FieldEntry, MapFieldSpace};
use malloy_expr_compiler::{compile_expression, DataType, Fragment};

fn num(s: &str) -> Expr {
    Expr::new(ExprKind::ExprNumber(s.into()))
}

fn field(name: &str) -> Expr {
    Expr::new(ExprKind::ExprField(name.into()))
}

fn boolean(b: bool) -> Expr {
    Expr::new(ExprKind::Boolean(b))
}

// S1 — Literal & field: a plain field reference over a non-aggregate number.
#[test]
fn s1_literal_and_field() {
    let fs = MapFieldSpace::new().with_field("x", FieldEntry::scalar(DataType::Number, false));
    let root = field("x");
    let result = compile_expression(&root, &fs);

    assert_eq!(result.value.data_type, DataType::Number);
    assert!(!result.value.aggregate);
    assert_eq!(result.value.value, vec![Fragment::field("x")]);
    assert!(result.diagnostics.is_empty());
}

// S2 — Arithmetic: `x + 1` over the same field space.
#[test]
fn s2_arithmetic() {
    let fs = MapFieldSpace::new().with_field("x", FieldEntry::scalar(DataType::Number, false));
    let root = Expr::new(ExprKind::BinaryNumeric(
        Box::new(field("x")),
        BinOp::Add,
        Box::new(num("1")),
    ));
    let result = compile_expression(&root, &fs);

    assert_eq!(result.value.data_type, DataType::Number);
    assert_eq!(
        result.value.value,
        vec![
            Fragment::field("x"),
            Fragment::text(" + "),
            Fragment::text("1"),
        ]
    );
}

// S3 — Range equality: `(1 to 10).apply("=", x)`.
#[test]
fn s3_range_equality() {
    let fs = MapFieldSpace::new().with_field("x", FieldEntry::scalar(DataType::Number, false));
    let range = Expr::new(ExprKind::Range(Box::new(num("1")), Box::new(num("10"))));
    let root = Expr::new(ExprKind::BinaryNumeric(
        Box::new(field("x")),
        BinOp::Eq,
        Box::new(range),
    ));
    let result = compile_expression(&root, &fs);

    assert_eq!(result.value.data_type, DataType::Boolean);
    assert_eq!(
        result.value.value,
        vec![
            Fragment::field("x"),
            Fragment::text(" >= "),
            Fragment::text("1"),
            Fragment::text(" and "),
            Fragment::field("x"),
            Fragment::text(" < "),
            Fragment::text("10"),
        ]
    );
}

// S4 — Alternation distributes: `(1 | 2).apply("=", x)`.
#[test]
fn s4_alternation() {
    use malloy_expr_compiler::ast::AltOp;

    let fs = MapFieldSpace::new().with_field("x", FieldEntry::scalar(DataType::Number, false));
    let alt = Expr::new(ExprKind::ExprAlternationTree(
        Box::new(num("1")),
        AltOp::Or,
        Box::new(num("2")),
    ));
    let root = Expr::new(ExprKind::BinaryNumeric(
        Box::new(field("x")),
        BinOp::Eq,
        Box::new(alt),
    ));
    let result = compile_expression(&root, &fs);

    assert_eq!(result.value.data_type, DataType::Boolean);
    assert_eq!(
        result.value.value,
        vec![
            Fragment::field("x"),
            Fragment::text(" = "),
            Fragment::text("1"),
            Fragment::text(" or "),
            Fragment::field("x"),
            Fragment::text(" = "),
            Fragment::text("2"),
        ]
    );
}

// S5 — Aggregate over aggregate is illegal.
#[test]
fn s5_aggregate_over_aggregate() {
    let fs = MapFieldSpace::new().with_field("sold", FieldEntry::scalar(DataType::Number, true));
    let root = Expr::new(ExprKind::ExprAggregateFunction(AggregateFunction {
        func: AggFunc::Sum,
        expr: Some(Box::new(field("sold"))),
        source: None,
    }));
    let result = compile_expression(&root, &fs);

    assert!(result.value.is_error());
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.message.contains("Can't use type")));
}

// S6 — Pick value-mode.
#[test]
fn s6_pick_value_mode() {
    let fs = MapFieldSpace::new();
    let root = Expr::new(ExprKind::Pick {
        choices: vec![PickWhen {
            pick: Some(Box::new(num("1"))),
            when: Box::new(boolean(true)),
        }],
        else_: Some(Box::new(num("0"))),
    });
    let result = compile_expression(&root, &fs);

    assert_eq!(result.value.data_type, DataType::Number);
    assert_eq!(
        result.value.value,
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

// §7 taxonomy — unknown name.
#[test]
fn unknown_field_is_reported_and_inert() {
    let fs = MapFieldSpace::new();
    let root = field("missing");
    let result = compile_expression(&root, &fs);

    assert!(result.value.is_error());
    assert_eq!(result.value.value.len(), 0);
    assert_eq!(result.diagnostics.len(), 1);
}

// §7 taxonomy — filter over a non-aggregate is identity (testable property 7).
#[test]
fn filter_over_non_aggregate_is_identity() {
    let fs = MapFieldSpace::new().with_field("x", FieldEntry::scalar(DataType::Number, false));
    let root = Expr::new(ExprKind::ExprFilter {
        expr: Box::new(field("x")),
        conditions: vec![boolean(true)],
    });
    let result = compile_expression(&root, &fs);

    assert_eq!(result.value.value, vec![Fragment::field("x")]);
}

// §7 taxonomy — partial expression misused as value (alternation tree).
#[test]
fn alternation_tree_alone_is_not_a_value() {
    use malloy_expr_compiler::ast::AltOp;

    let fs = MapFieldSpace::new();
    let root = Expr::new(ExprKind::ExprAlternationTree(
        Box::new(num("1")),
        AltOp::Or,
        Box::new(num("2")),
    ));
    let result = compile_expression(&root, &fs);

    assert!(result.value.is_error());
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.message.contains("no value")));
}

// Not(Not(e)) double negation stays boolean and null-preserving (testable
// property 4) — asserted on shape since SQL-dialect semantic equivalence is
// outside this crate's scope.
#[test]
fn double_negation_stays_boolean() {
    let fs = MapFieldSpace::new().with_field("flag", FieldEntry::scalar(DataType::Boolean, false));
    let once = Expr::new(ExprKind::ExprNot(Box::new(field("flag"))));
    let twice = Expr::new(ExprKind::ExprNot(Box::new(once)));
    let result = compile_expression(&twice, &fs);

    assert_eq!(result.value.data_type, DataType::Boolean);
    assert!(result.diagnostics.is_empty());
}

// Granular equality truncates the non-granular side to match.
#[test]
fn granular_equality_truncates_non_granular_side() {
    use malloy_expr_compiler::ast::Timeframe;

    let fs = MapFieldSpace::new().with_field("created_at", FieldEntry::scalar(DataType::Date, false));
    let granular = Expr::new(ExprKind::ExprTime {
        kind: TimeKind::Date,
        value: "'2024-01-01'".into(),
        timeframe: Some(Timeframe::Month),
    });
    let root = Expr::new(ExprKind::BinaryNumeric(
        Box::new(field("created_at")),
        BinOp::Eq,
        Box::new(granular),
    ));
    let result = compile_expression(&root, &fs);

    assert_eq!(result.value.data_type, DataType::Boolean);
    assert!(result
        .value
        .value
        .iter()
        .any(|f| matches!(f, Fragment::Text(t) if t.contains("DATE_TRUNC_month"))));
}
