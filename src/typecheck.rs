//! Legal-child-type checking (spec §4.C).

use itertools::Itertools;

use crate::ast::types::{DataType, ExprValue};
use crate::error::{Diagnostics, Span};

/// One acceptable `{dataType, aggregate?}` shape for an operand. `aggregate`
/// is `None` when the node doesn't care whether the child is an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeShape {
    pub data_type: DataType,
    pub aggregate: Option<bool>,
}

impl TypeShape {
    pub const fn any_aggregate(data_type: DataType) -> Self {
        TypeShape {
            data_type,
            aggregate: None,
        }
    }

    pub const fn non_aggregate(data_type: DataType) -> Self {
        TypeShape {
            data_type,
            aggregate: Some(false),
        }
    }
}

/// Convenience: builds a legal-type set from a list of data types, with no
/// constraint on aggregation-ness.
pub fn shapes(data_types: &[DataType]) -> Vec<TypeShape> {
    data_types
        .iter()
        .map(|dt| TypeShape::any_aggregate(*dt))
        .collect_vec()
}

/// `typeCheck(node, value, legal)`. On success returns `true`; on failure
/// records `"'<element_type>' Can't use type <dataType>"` against `span` and
/// returns `false`. `error`-typed values always fail silently (no new
/// diagnostic — the failure was already reported upstream).
pub fn type_check(
    element_type: &str,
    span: Option<Span>,
    value: &ExprValue,
    legal: &[TypeShape],
    diagnostics: &mut Diagnostics,
) -> bool {
    if value.is_error() {
        return false;
    }

    let matches = legal.iter().any(|shape| {
        shape.data_type == value.data_type
            && shape.aggregate.map_or(true, |a| a == value.aggregate)
    });

    if !matches {
        diagnostics.log(
            span,
            format!("'{element_type}' Can't use type {}", value.data_type),
        );
    }

    matches
}
