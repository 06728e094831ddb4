//! `ExprCast(e, type, safe?)` (spec §4.E): `cast(e as type)` /
//! `safe_cast(e as type)`, with special-cased date/timestamp conversions.

use crate::apply::wrap_call;
use crate::ast::{DataType, Expr, ExprValue, Timeframe};
use crate::fragment::Fragment;
use crate::translate::{self, Ctx};

pub fn translate(inner: &Expr, to: DataType, safe: bool, ctx: &mut Ctx) -> ExprValue {
    let v = translate::translate(inner, ctx);
    if v.is_error() {
        return v;
    }

    match (v.data_type, to) {
        (DataType::Date, DataType::Timestamp) => {
            ExprValue::new(DataType::Timestamp, v.aggregate, wrap_call("TIMESTAMP", &v.value))
        }
        (DataType::Timestamp, DataType::Date) => {
            ExprValue::new(DataType::Date, v.aggregate, wrap_call("DATE", &v.value))
                .with_timeframe(Some(Timeframe::Day))
        }
        _ => {
            let function = if safe { "safe_cast" } else { "cast" };
            let mut value = Vec::with_capacity(v.value.len() + 2);
            value.push(Fragment::text(format!("{function}(")));
            value.extend(v.value.iter().cloned());
            value.push(Fragment::text(format!(" as {to})")));
            ExprValue::new(to, v.aggregate, value)
        }
    }
}
