//! Literal nodes (spec §4.E "Literals"): each carries its source text
//! verbatim into a single fragment — the core never folds or re-renders
//! literal text, it only tags it with a data type.

use crate::ast::{DataType, Expr, ExprKind, ExprValue, TimeKind};
use crate::fragment::{error_for, Fragment};
use crate::translate::Ctx;

pub fn translate(e: &Expr, ctx: &mut Ctx) -> ExprValue {
    match &e.kind {
        ExprKind::ExprString(s) => scalar(DataType::String, s),
        ExprKind::ExprNumber(s) => scalar(DataType::Number, s),
        ExprKind::ExprRegEx(s) => translate_regex(e, s, ctx),
        ExprKind::Boolean(b) => scalar(DataType::Boolean, if *b { "true" } else { "false" }),
        ExprKind::ExprNULL => scalar(DataType::Null, "null"),
        ExprKind::ExprTime {
            kind,
            value,
            timeframe,
        } => {
            let data_type = match kind {
                TimeKind::Date => DataType::Date,
                TimeKind::Timestamp => DataType::Timestamp,
            };
            ExprValue::new(data_type, false, vec![Fragment::text(value.clone())]).with_timeframe(*timeframe)
        }
        other => unreachable!("translate::literal called with non-literal node {other:?}"),
    }
}

fn scalar(data_type: DataType, text: &str) -> ExprValue {
    ExprValue::new(data_type, false, vec![Fragment::text(text)])
}

/// Validates the pattern text compiles as a regular expression before it's
/// handed to the downstream writer — a sanity check the parser's lexer can't
/// do on its own since it doesn't know the target dialect's regex flavor.
fn translate_regex(e: &Expr, pattern: &str, ctx: &mut Ctx) -> ExprValue {
    if let Err(err) = regex::Regex::new(pattern) {
        ctx.diagnostics
            .log(e.span, format!("Invalid regular expression: {err}"));
        return error_for();
    }
    scalar(DataType::RegularExpression, pattern)
}
