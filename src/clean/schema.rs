use arrow::{
    array::StringArray,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};

/// Decide the final type of each column of an all-text batch: `Int64` when
/// every non-null value parses as an integer, `Float64` when every non-null
/// value parses as a number, `Utf8` otherwise. Columns named in
/// `text_columns` are never reinterpreted.
pub fn infer_schema(batch: &RecordBatch, text_columns: &[String]) -> Schema {
    let mut fields = Vec::with_capacity(batch.num_columns());

    for (i, field) in batch.schema().fields().iter().enumerate() {
        if text_columns.iter().any(|c| c == field.name()) {
            fields.push(Field::new(field.name().as_str(), DataType::Utf8, true));
            continue;
        }
        let ty = batch
            .column(i)
            .as_any()
            .downcast_ref::<StringArray>()
            .map(infer_column_type)
            .unwrap_or(DataType::Utf8);
        fields.push(Field::new(field.name().as_str(), ty, true));
    }

    Schema::new(fields)
}

fn infer_column_type(values: &StringArray) -> DataType {
    let mut seen = false;
    let mut all_int = true;
    let mut all_float = true;

    for value in values.iter().flatten() {
        seen = true;
        if all_int && value.parse::<i64>().is_err() {
            all_int = false;
        }
        if value.parse::<f64>().is_err() {
            all_float = false;
            break;
        }
    }

    // An all-null column has nothing to infer from and stays text.
    if !seen {
        DataType::Utf8
    } else if all_int {
        DataType::Int64
    } else if all_float {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}
