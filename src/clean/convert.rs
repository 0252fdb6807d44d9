use std::sync::Arc;

use arrow::{
    array::{ArrayRef, Float64Builder, Int64Builder, StringArray},
    datatypes::{DataType, Schema},
    record_batch::RecordBatch,
};

use crate::error::CleanResult;

/// Rebuild an all-text batch under its final schema. Nulls stay null; a
/// value that fails to parse under the inferred type also becomes null,
/// though inference guarantees that does not happen in practice.
pub fn convert_types(batch: &RecordBatch, schema: &Schema) -> CleanResult<RecordBatch> {
    let mut out: Vec<ArrayRef> = Vec::with_capacity(batch.num_columns());

    for (arr, field) in batch.columns().iter().zip(schema.fields()) {
        match (arr.as_any().downcast_ref::<StringArray>(), field.data_type()) {
            (Some(sarr), DataType::Int64) => {
                let mut b = Int64Builder::new();
                for opt in sarr.iter() {
                    b.append_option(opt.and_then(|s| s.parse().ok()));
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }

            (Some(sarr), DataType::Float64) => {
                let mut b = Float64Builder::new();
                for opt in sarr.iter() {
                    b.append_option(opt.and_then(|s| s.parse().ok()));
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }

            // Text columns pass through untouched.
            _ => out.push(arr.clone()),
        }
    }

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), out)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::infer_schema;
    use arrow::array::{Array, Float64Array, Int64Array};
    use arrow::datatypes::Field;

    fn text_batch(columns: Vec<(&str, Vec<Option<&str>>)>) -> RecordBatch {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
            .collect();
        let arrays: Vec<ArrayRef> = columns
            .into_iter()
            .map(|(_, values)| Arc::new(StringArray::from(values)) as ArrayRef)
            .collect();
        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
    }

    #[test]
    fn counts_convert_without_a_decimal_point() {
        let batch = text_batch(vec![("V00047", vec![Some("5"), None])]);
        let converted = convert_types(&batch, &infer_schema(&batch, &[])).unwrap();

        let col = converted
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(col.value(0), 5);
        assert!(col.is_null(1));
    }

    #[test]
    fn mixed_numbers_convert_to_float() {
        let batch = text_batch(vec![("V01006", vec![Some("1.5"), Some("2")])]);
        let converted = convert_types(&batch, &infer_schema(&batch, &[])).unwrap();

        let col = converted
            .column(0)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(col.value(0), 1.5);
        assert_eq!(col.value(1), 2.0);
    }

    #[test]
    fn forced_text_preserves_leading_zeros() {
        let batch = text_batch(vec![("CD_SETOR", vec![Some("010101")])]);
        let forced = vec!["CD_SETOR".to_string()];
        let converted = convert_types(&batch, &infer_schema(&batch, &forced)).unwrap();

        let col = converted
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(col.value(0), "010101");
    }
}
