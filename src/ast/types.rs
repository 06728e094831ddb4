//! The scalar type system over expression values: data type, aggregation-ness
//! and optional time granularity (spec §3 "Data type" / "Granularity" /
//! "ExprValue").

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::fragment::FragmentSeq;

/// The closed set of scalar data types an expression can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Date,
    Timestamp,
    Null,
    #[strum(serialize = "regular expression")]
    RegularExpression,
    /// Sentinel propagated after a translation failure. Inert: consumers
    /// must neither emit diagnostics nor produce further errors from it.
    Error,
}

impl DataType {
    pub fn is_temporal(self) -> bool {
        matches!(self, DataType::Date | DataType::Timestamp)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Number)
    }

    pub fn is_error(self) -> bool {
        matches!(self, DataType::Error)
    }
}

/// A coarsening applied to a granular date/timestamp value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Timeframe {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

/// The result of translating an expression node: its type, whether it is an
/// aggregate, the fragment sequence it lowers to, and (for granular times)
/// the coarsening timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprValue {
    pub data_type: DataType,
    pub aggregate: bool,
    pub value: FragmentSeq,
    pub timeframe: Option<Timeframe>,
}

impl ExprValue {
    pub fn new(data_type: DataType, aggregate: bool, value: FragmentSeq) -> Self {
        ExprValue {
            data_type,
            aggregate,
            value,
            timeframe: None,
        }
    }

    pub fn with_timeframe(mut self, timeframe: Option<Timeframe>) -> Self {
        self.timeframe = timeframe;
        self
    }

    pub fn is_granular(&self) -> bool {
        self.data_type.is_temporal() && self.timeframe.is_some()
    }

    pub fn is_error(&self) -> bool {
        self.data_type.is_error()
    }

    /// Strict type equality: data types match. Aggregation-ness is never
    /// part of type equality (spec §3 "Type equality").
    pub fn type_eq(&self, other: &ExprValue) -> bool {
        self.data_type == other.data_type
    }

    /// Loose type equality: `null` is additionally treated as equal to
    /// anything.
    pub fn loose_type_eq(&self, other: &ExprValue) -> bool {
        self.data_type == DataType::Null
            || other.data_type == DataType::Null
            || self.data_type == other.data_type
    }
}
