//! The fragment model: the ABI between this compiler and the downstream SQL
//! writer (spec §3 "Fragment" / §9 "Fragment sequence as ABI").
//!
//! A [`FragmentSeq`] is the lowered form of every expression: an ordered mix
//! of literal SQL text and structured placeholders that a later stage
//! splices into dialect-specific SQL. The tag strings used here
//! (`field`/`aggregate`/`filterExpression`) are part of the stable interface
//! and are never renamed casually.

use serde::{Deserialize, Serialize};

use crate::ast::types::{DataType, ExprValue};
use crate::field_space::FilterCond;

/// One element of a fragment sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Fragment {
    /// Opaque literal SQL text.
    #[serde(rename = "text")]
    Text(String),

    /// A reference to a field, by its dotted path.
    #[serde(rename = "field")]
    Field { path: String },

    /// A call to an aggregate function, optionally scoped to a relation
    /// (`struct_path`) and carrying a default output column name for the
    /// asymmetric `sum`/`avg` naming rule (spec §4.E).
    #[serde(rename = "aggregate")]
    Aggregate {
        function: String,
        e: FragmentSeq,
        #[serde(skip_serializing_if = "Option::is_none")]
        struct_path: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// An expression restricted to rows matching `filter_list`.
    #[serde(rename = "filterExpression")]
    FilterExpression {
        e: FragmentSeq,
        filter_list: Vec<FilterCond>,
    },
}

impl Fragment {
    pub fn text<S: Into<String>>(s: S) -> Fragment {
        Fragment::Text(s.into())
    }

    pub fn field<S: Into<String>>(path: S) -> Fragment {
        Fragment::Field { path: path.into() }
    }
}

/// An ordered sequence of fragments.
pub type FragmentSeq = Vec<Fragment>;

/// `compose(left, " op ", right)`: joins two fragment sequences with a
/// literal operator text in between.
pub fn compose(left: &FragmentSeq, op_text: &str, right: &FragmentSeq) -> FragmentSeq {
    let mut out = Vec::with_capacity(left.len() + right.len() + 1);
    out.extend(left.iter().cloned());
    out.push(Fragment::text(op_text));
    out.extend(right.iter().cloned());
    out
}

/// Merges adjacent literal-text fragments. Idempotent; preserves placeholder
/// positions (spec §8 invariant 3).
pub fn compress(seq: &FragmentSeq) -> FragmentSeq {
    let mut out: FragmentSeq = Vec::with_capacity(seq.len());
    for frag in seq {
        match (out.last_mut(), frag) {
            (Some(Fragment::Text(prev)), Fragment::Text(next)) => {
                prev.push_str(next);
            }
            _ => out.push(frag.clone()),
        }
    }
    out
}

/// Builds the `error`-typed [`ExprValue`] every diagnosable translation path
/// returns. Its fragment sequence is empty — an error value is inert and
/// must never be composed into further SQL text.
pub fn error_for() -> ExprValue {
    ExprValue::new(DataType::Error, false, Vec::new())
}
