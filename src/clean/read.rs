use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use tracing::debug;

use super::ReadOptions;
use crate::error::{CleanError, CleanResult};

/// Read a delimited file into an all-text RecordBatch.
///
/// Selection and sentinel substitution happen during parse: only the
/// requested columns are materialized, and a raw cell equal to the sentinel
/// (or entirely empty, the serialized form of a missing value) becomes a
/// null rather than a string.
pub fn read_table(path: &Path, options: &ReadOptions) -> CleanResult<RecordBatch> {
    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => CleanError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => CleanError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| CleanError::Parse {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(CleanError::Empty {
            path: path.to_path_buf(),
        });
    }

    // Resolve the projection up front so a missing column fails before any
    // row is materialized.
    let projection: Vec<(String, usize)> = if options.columns.is_empty() {
        headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect()
    } else {
        options
            .columns
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .map(|idx| (name.clone(), idx))
                    .ok_or_else(|| CleanError::ColumnNotFound {
                        column: name.clone(),
                        path: path.to_path_buf(),
                    })
            })
            .collect::<CleanResult<_>>()?
    };

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); projection.len()];
    for record in rdr.records() {
        let record = record.map_err(|source| CleanError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        for (slot, (_, col_idx)) in projection.iter().enumerate() {
            let raw = record.get(*col_idx).unwrap_or("");
            if raw.is_empty() || raw == options.sentinel {
                cells[slot].push(None);
            } else {
                cells[slot].push(Some(raw.to_string()));
            }
        }
    }

    let mut fields = Vec::with_capacity(projection.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(projection.len());
    for ((name, _), column) in projection.iter().zip(cells) {
        fields.push(Field::new(name.as_str(), DataType::Utf8, true));
        arrays.push(Arc::new(StringArray::from(column)) as ArrayRef);
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
    debug!(
        "parsed {} ({} rows, {} columns)",
        path.display(),
        batch.num_rows(),
        batch.num_columns()
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, StringArray};
    use std::fs;
    use tempfile::tempdir;

    fn text_column(batch: &RecordBatch, idx: usize) -> &StringArray {
        batch
            .column(idx)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap()
    }

    #[test]
    fn sentinel_and_empty_cells_become_null() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "CD_setor;V00047;V00048\n010101;X;\n010202;9;1\n").unwrap();

        let batch = read_table(&path, &ReadOptions::default()).unwrap();

        assert_eq!(batch.num_rows(), 2);
        let counts = text_column(&batch, 1);
        assert!(counts.is_null(0));
        assert_eq!(counts.value(1), "9");
        let extra = text_column(&batch, 2);
        assert!(extra.is_null(0));
    }

    #[test]
    fn projection_keeps_requested_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "A;B;C\n1;2;3\n").unwrap();

        let options = ReadOptions {
            columns: vec!["C".into(), "A".into()],
            ..ReadOptions::default()
        };
        let batch = read_table(&path, &options).unwrap();

        let names: Vec<_> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, vec!["C", "A"]);
        assert_eq!(text_column(&batch, 0).value(0), "3");
        assert_eq!(text_column(&batch, 1).value(0), "1");
    }

    #[test]
    fn absent_column_fails_fast() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "A;B\n1;2\n").unwrap();

        let options = ReadOptions {
            columns: vec!["A".into(), "Z".into()],
            ..ReadOptions::default()
        };
        let err = read_table(&path, &options).unwrap_err();
        assert!(matches!(
            err,
            CleanError::ColumnNotFound { ref column, .. } if column == "Z"
        ));
    }

    #[test]
    fn missing_file_is_not_an_io_error() {
        let dir = tempdir().unwrap();
        let err = read_table(&dir.path().join("nope.csv"), &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, CleanError::FileNotFound { .. }));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "A;B\n1;2;3\n").unwrap();

        let err = read_table(&path, &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, CleanError::Parse { .. }));
    }

    #[test]
    fn quoted_fields_use_the_configured_quote() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "CD_setor;NM_mun\n010101;\"Rio; Grande\"\n").unwrap();

        let batch = read_table(&path, &ReadOptions::default()).unwrap();
        assert_eq!(text_column(&batch, 1).value(0), "Rio; Grande");
    }
}
