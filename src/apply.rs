//! The apply/binary engine (spec §4.D): the single entry point for binary
//! composition, dispatching on operator and operand data types.

use crate::ast::expr::{BinOp, BoolOp};
use crate::ast::types::{DataType, ExprValue, Timeframe};
use crate::error::{Diagnostics, Span};
use crate::fragment::{compose, error_for, Fragment, FragmentSeq};
use crate::typecheck::{shapes, type_check};

/// `applyBinary(fs, left, op, right)`. `fs` isn't consulted directly here —
/// it's threaded through for signature parity with the spec and with the
/// teacher's `ctx`-threaded translate functions (`sql/gen_expr.rs`,
/// `sql/operators.rs`), since every other stage of translation needs it.
pub fn apply_binary(
    element_type: &str,
    span: Option<Span>,
    left: &ExprValue,
    op: BinOp,
    right: &ExprValue,
    diagnostics: &mut Diagnostics,
) -> ExprValue {
    if left.is_error() || right.is_error() {
        return error_for();
    }

    if op.is_arithmetic() {
        return apply_arithmetic(element_type, span, left, op, right, diagnostics);
    }

    match op {
        BinOp::Match | BinOp::NotMatch => apply_regex_match(element_type, span, left, op, right, diagnostics),
        _ if op.is_comparison() => apply_comparison(element_type, span, left, op, right, diagnostics),
        _ => unreachable!("apply_binary called with a non-binary operator"),
    }
}

fn apply_arithmetic(
    element_type: &str,
    span: Option<Span>,
    left: &ExprValue,
    op: BinOp,
    right: &ExprValue,
    diagnostics: &mut Diagnostics,
) -> ExprValue {
    let numeric = shapes(&[DataType::Number]);
    let left_ok = type_check(element_type, span, left, &numeric, diagnostics);
    let right_ok = type_check(element_type, span, right, &numeric, diagnostics);
    if !left_ok || !right_ok {
        return error_for();
    }

    let value = compose(&left.value, op.sql_text().expect("arithmetic ops are infix"), &right.value);
    ExprValue::new(DataType::Number, left.aggregate || right.aggregate, value)
}

/// Boolean `and`/`or` (spec §4.E `BinaryBoolean`). Aggregate operands are
/// allowed; order is preserved verbatim in the emitted SQL.
pub fn apply_bool(
    element_type: &str,
    span: Option<Span>,
    left: &ExprValue,
    op: BoolOp,
    right: &ExprValue,
    diagnostics: &mut Diagnostics,
) -> ExprValue {
    if left.is_error() || right.is_error() {
        return error_for();
    }

    let boolean = shapes(&[DataType::Boolean]);
    let left_ok = type_check(element_type, span, left, &boolean, diagnostics);
    let right_ok = type_check(element_type, span, right, &boolean, diagnostics);
    if !left_ok || !right_ok {
        return error_for();
    }

    let value = compose(&left.value, op.sql_text(), &right.value);
    ExprValue::new(DataType::Boolean, left.aggregate || right.aggregate, value)
}

fn apply_comparison(
    element_type: &str,
    span: Option<Span>,
    left: &ExprValue,
    op: BinOp,
    right: &ExprValue,
    diagnostics: &mut Diagnostics,
) -> ExprValue {
    let (left, right) = match promote_temporal_pair(left, right) {
        Some(pair) => pair,
        None => {
            diagnostics.log(
                span,
                format!(
                    "'{element_type}' Can't use type {}",
                    if left.data_type.is_temporal() {
                        right.data_type
                    } else {
                        left.data_type
                    }
                ),
            );
            return error_for();
        }
    };

    let aggregate = left.aggregate || right.aggregate;
    let value = compose(&left.value, op.sql_text().expect("comparisons are infix"), &right.value);
    ExprValue::new(DataType::Boolean, aggregate, value)
}

/// Resolves the operand pair for a comparison: same-type pairs pass through
/// unchanged; a date/timestamp mix promotes the coarser side to the finer
/// (`thisValueToTimestamp`); a granular/non-granular temporal pair truncates
/// the non-granular side to the granular side's timeframe first. Any other
/// type mismatch fails.
fn promote_temporal_pair(left: &ExprValue, right: &ExprValue) -> Option<(ExprValue, ExprValue)> {
    if left.data_type == right.data_type {
        if left.data_type.is_temporal() {
            return Some(granular_promote(left.clone(), right.clone()));
        }
        return Some((left.clone(), right.clone()));
    }

    match (left.data_type, right.data_type) {
        (DataType::Date, DataType::Timestamp) => Some((to_timestamp(left), right.clone())),
        (DataType::Timestamp, DataType::Date) => Some((left.clone(), to_timestamp(right))),
        _ => None,
    }
}

/// Wraps a `date` value so it can be compared against a `timestamp`
/// (`thisValueToTimestamp`).
fn to_timestamp(v: &ExprValue) -> ExprValue {
    let value = wrap_call("TIMESTAMP", &v.value);
    ExprValue::new(DataType::Timestamp, v.aggregate, value)
}

/// Granular equality (spec §4.D): if exactly one side carries a timeframe,
/// the other is truncated to it before comparing.
fn granular_promote(left: ExprValue, right: ExprValue) -> (ExprValue, ExprValue) {
    match (left.timeframe, right.timeframe) {
        (Some(tf), None) => (left, truncate_to(right, tf)),
        (None, Some(tf)) => (truncate_to(left, tf), right),
        _ => (left, right),
    }
}

fn truncate_to(mut v: ExprValue, timeframe: Timeframe) -> ExprValue {
    v.value = wrap_call(&format!("DATE_TRUNC_{timeframe}"), &v.value);
    v.timeframe = Some(timeframe);
    v
}

pub(crate) fn wrap_call(function: &str, inner: &FragmentSeq) -> FragmentSeq {
    let mut out = Vec::with_capacity(inner.len() + 2);
    out.push(Fragment::text(format!("{function}(")));
    out.extend(inner.iter().cloned());
    out.push(Fragment::text(")"));
    out
}

fn apply_regex_match(
    element_type: &str,
    span: Option<Span>,
    left: &ExprValue,
    op: BinOp,
    right: &ExprValue,
    diagnostics: &mut Diagnostics,
) -> ExprValue {
    let string_ty = shapes(&[DataType::String]);
    let regex_ty = shapes(&[DataType::RegularExpression]);
    let left_ok = type_check(element_type, span, left, &string_ty, diagnostics);
    let right_ok = type_check(element_type, span, right, &regex_ty, diagnostics);
    if !left_ok || !right_ok {
        return error_for();
    }

    let aggregate = left.aggregate || right.aggregate;
    let matched = compose(&left.value, " ~ ", &right.value);

    let value = match op {
        BinOp::Match => matched,
        BinOp::NotMatch => nullsafe_not(&matched),
        _ => unreachable!("apply_regex_match called with a non-regex operator"),
    };
    ExprValue::new(DataType::Boolean, aggregate, value)
}

/// `nullsafeNot(x)`: emits SQL that yields `true` when `x` is `null`,
/// i.e. `(x) is null or not (x)` — preserves three-valued-logic semantics
/// where `not null == null` must not suppress row filtering.
///
/// Applied only at explicit `Not` nodes (spec §9 Open Question (b)): other
/// boolean combinators never null-propagate.
pub fn nullsafe_not(x: &FragmentSeq) -> FragmentSeq {
    let mut out = Vec::with_capacity(x.len() * 2 + 3);
    out.push(Fragment::text("("));
    out.extend(x.iter().cloned());
    out.push(Fragment::text(") is null or not ("));
    out.extend(x.iter().cloned());
    out.push(Fragment::text(")"));
    out
}
