//! The expression AST (spec §4.E) — one variant per syntactic form.
//!
//! Mirrors the teacher's `ExprKind` tagged-union style (`ast/pl/expr.rs`):
//! a single enum carries every construct, and node-specific behaviour lives
//! in match arms of the `Translate` dispatcher (`crate::translate`) rather
//! than in per-type trait impls — the "deep inheritance hierarchy → tagged
//! union" rewrite called for in spec §9.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::ast::types::{DataType, Timeframe};
use crate::error::Span;

/// A node in the expression tree. Nodes are constructed by the parser and
/// never mutated after construction, except to attach diagnostics against
/// `span` (spec §3 "Lifecycle").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Option<Span>,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr { kind, span: None }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// The human-readable element-type tag used in type-mismatch
    /// diagnostics (spec §4.C): `"'<elementType>' Can't use type <dataType>"`.
    pub fn element_type(&self) -> String {
        self.kind.element_type()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TimeKind {
    Date,
    Timestamp,
}

/// Operators dispatched right-biased through `apply` (spec §4.D): the full
/// `{=, !=, <, <=, >, >=, +, -, *, /, ~, !~}` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
pub enum BinOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    /// `~` — regex match.
    Match,
    /// `!~` — null-safe negated regex match.
    NotMatch,
}

impl BinOp {
    /// True for the four arithmetic operators.
    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div)
    }

    /// True for ordering/equality comparisons (excludes regex match).
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    /// The literal SQL infix text for operators with a direct textual
    /// rendering. Regex-match operators are handled specially in
    /// `crate::apply` since their SQL shape isn't a simple infix.
    pub fn sql_text(self) -> Option<&'static str> {
        match self {
            BinOp::Eq => Some(" = "),
            BinOp::Ne => Some(" != "),
            BinOp::Lt => Some(" < "),
            BinOp::Le => Some(" <= "),
            BinOp::Gt => Some(" > "),
            BinOp::Ge => Some(" >= "),
            BinOp::Add => Some(" + "),
            BinOp::Sub => Some(" - "),
            BinOp::Mul => Some(" * "),
            BinOp::Div => Some(" / "),
            BinOp::Match | BinOp::NotMatch => None,
        }
    }

    /// The operator with its sense inverted, used when promoting a range
    /// comparison or negating a comparison.
    pub fn negated(self) -> BinOp {
        match self {
            BinOp::Eq => BinOp::Ne,
            BinOp::Ne => BinOp::Eq,
            BinOp::Lt => BinOp::Ge,
            BinOp::Le => BinOp::Gt,
            BinOp::Gt => BinOp::Le,
            BinOp::Ge => BinOp::Lt,
            other => other,
        }
    }
}

/// `and` / `or` — require boolean operands (spec §4.E `BinaryBoolean`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn sql_text(self) -> &'static str {
        match self {
            BoolOp::And => " and ",
            BoolOp::Or => " or ",
        }
    }
}

/// `|` / `&` — alternation-tree combinators (spec §4.E `ExprAlternationTree`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
pub enum AltOp {
    Or,
    And,
}

/// One `WHEN ... THEN ...` arm of an `ExprCase`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseWhen {
    pub when: Box<Expr>,
    pub then: Box<Expr>,
}

/// One arm of a `Pick`: an optional then-branch (`pick`, defaulting to the
/// apply-mode right-hand operand when omitted) and a `when` partial
/// expression compared against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickWhen {
    pub pick: Option<Box<Expr>>,
    pub when: Box<Expr>,
}

/// The aggregate functions defined by spec §4.E's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AggFunc {
    Count,
    CountDistinct,
    Sum,
    Avg,
    Min,
    Max,
}

/// `ExprAggregateFunction` (spec §4.E): holds the function, an optional
/// explicit expression, and an optional `source` field path the aggregate is
/// local to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateFunction {
    pub func: AggFunc,
    pub expr: Option<Box<Expr>>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
pub enum ExprKind {
    ExprString(String),
    /// Numeric literals keep their source text verbatim — the core never
    /// evaluates or folds constants (spec §1 Non-goals).
    ExprNumber(String),
    ExprRegEx(String),
    ExprTime {
        kind: TimeKind,
        value: String,
        timeframe: Option<Timeframe>,
    },
    Boolean(bool),
    ExprNULL,

    ExprField(String),

    ExprParens(Box<Expr>),
    ExprMinus(Box<Expr>),
    ExprNot(Box<Expr>),

    BinaryNumeric(Box<Expr>, BinOp, Box<Expr>),
    BinaryBoolean(Box<Expr>, BoolOp, Box<Expr>),

    ExprAlternationTree(Box<Expr>, AltOp, Box<Expr>),
    Range(Box<Expr>, Box<Expr>),

    ExprCase {
        whens: Vec<CaseWhen>,
        else_: Option<Box<Expr>>,
    },
    Pick {
        choices: Vec<PickWhen>,
        else_: Option<Box<Expr>>,
    },

    ExprCast {
        expr: Box<Expr>,
        to: DataType,
        safe: bool,
    },
    ExprFilter {
        expr: Box<Expr>,
        conditions: Vec<Expr>,
    },

    ExprAggregateFunction(AggregateFunction),
}

impl ExprKind {
    /// The spec's "element-type tag (human-readable)". Aggregates use their
    /// function name, matching how the source reports aggregate
    /// type-mismatches (e.g. `"'sum' Can't use type boolean"`).
    pub fn element_type(&self) -> String {
        match self {
            ExprKind::ExprAggregateFunction(agg) => agg.func.to_string(),
            other => other.as_ref().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_element_type_is_the_function_name() {
        let e = ExprKind::ExprAggregateFunction(AggregateFunction {
            func: AggFunc::Sum,
            expr: None,
            source: None,
        });
        assert_eq!(e.element_type(), "sum");
    }

    #[test]
    fn binop_negation_is_involutive() {
        for op in [
            BinOp::Eq,
            BinOp::Ne,
            BinOp::Lt,
            BinOp::Le,
            BinOp::Gt,
            BinOp::Ge,
        ] {
            assert_eq!(op.negated().negated(), op);
        }
    }
}
