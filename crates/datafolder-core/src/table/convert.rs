//! Arrow array to cell value conversion.
//!
//! Integer widths widen to `i64`, float widths to `f64` and string layouts
//! to `String`. Dictionary arrays are unpacked to their value type first.
//! Anything without a scalar counterpart (dates, timestamps, decimals,
//! binary, nested types) is rendered with Arrow's display formatter.

use arrow::{
    array::{Array, ArrayRef, AsArray},
    compute::cast,
    datatypes::{DataType, Float64Type, Int64Type, UInt64Type},
    error::ArrowError,
    util::display::{ArrayFormatter, FormatOptions},
};

use crate::value::Value;

pub(crate) fn array_values(array: &ArrayRef) -> Result<Vec<Value>, ArrowError> {
    let values = match array.data_type() {
        DataType::Null => vec![Value::Null; array.len()],

        DataType::Boolean => array.as_boolean().iter().map(Value::from).collect(),

        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => {
            let ints = cast(array, &DataType::Int64)?;
            ints.as_primitive::<Int64Type>()
                .iter()
                .map(Value::from)
                .collect()
        }

        // u64 above i64::MAX has no integer representation here.
        DataType::UInt64 => array
            .as_primitive::<UInt64Type>()
            .iter()
            .map(|v| match v {
                None => Value::Null,
                Some(v) => i64::try_from(v).map_or(Value::Float(v as f64), Value::Int),
            })
            .collect(),

        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            let floats = cast(array, &DataType::Float64)?;
            floats
                .as_primitive::<Float64Type>()
                .iter()
                .map(Value::from)
                .collect()
        }

        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let strings = cast(array, &DataType::Utf8)?;
            strings
                .as_string::<i32>()
                .iter()
                .map(Value::from)
                .collect()
        }

        DataType::Dictionary(_, value_type) => {
            let unpacked = cast(array, value_type)?;
            return array_values(&unpacked);
        }

        _ => formatted_values(array.as_ref())?,
    };

    Ok(values)
}

fn formatted_values(array: &dyn Array) -> Result<Vec<Value>, ArrowError> {
    let options = FormatOptions::default();
    let formatter = ArrayFormatter::try_new(array, &options)?;

    Ok((0..array.len())
        .map(|i| {
            if array.is_null(i) {
                Value::Null
            } else {
                Value::String(formatter.value(i).to_string())
            }
        })
        .collect())
}
