use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::row::{Row, Value};

/// Convert an Arrow [`RecordBatch`] into a `Vec<Row>`, one per batch row,
/// keeping the schema's column order.
///
/// Null cells become [`Value::Null`]. Columns of a type not listed below are
/// left out of the rows entirely.
///
/// | Arrow Type | → | Row Value       |
/// |------------|---|-----------------|
/// | Utf8       | → | Value::Str(s)   |
/// | Int64      | → | Value::Number   |
/// | Float64    | → | Value::Number   |
/// | Boolean    | → | Value::Bool(b)  |
pub fn batch_to_rows(batch: &RecordBatch) -> Vec<Row> {
    let num_rows = batch.num_rows();
    let schema = batch.schema();
    let mut rows = vec![Row::new(); num_rows];

    for (col_idx, field) in schema.fields().iter().enumerate() {
        let col = batch.column(col_idx);
        if !is_supported(col.data_type()) {
            log::debug!("skipping column {} of type {}", field.name(), col.data_type());
            continue;
        }
        for (row_idx, row) in rows.iter_mut().enumerate() {
            let value = if col.is_null(row_idx) {
                Value::Null
            } else {
                extract_value(col.as_ref(), row_idx).unwrap_or(Value::Null)
            };
            row.set(field.name().as_str(), value);
        }
    }
    rows
}

fn is_supported(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::Int64 | DataType::Float64 | DataType::Boolean
    )
}

fn extract_value(col: &dyn Array, row: usize) -> Option<Value> {
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>()?;
            Some(Value::Str(arr.value(row).to_string()))
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>()?;
            Some(Value::Number(arr.value(row) as f64))
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>()?;
            Some(Value::Number(arr.value(row)))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>()?;
            Some(Value::Bool(arr.value(row)))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
