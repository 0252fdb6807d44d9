use std::{fs::File, path::Path};

use arrow::record_batch::RecordBatch;
use tracing::debug;

use crate::error::{CleanError, CleanResult};

/// Serialize a table as comma-separated text: header row first, no index
/// column, nulls as empty fields. Any existing file at `output_path` is
/// overwritten.
pub fn write_table(batch: &RecordBatch, output_path: &Path) -> CleanResult<()> {
    let file = File::create(output_path).map_err(|source| CleanError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;

    let mut writer = arrow::csv::WriterBuilder::new()
        .with_header(true)
        .with_delimiter(b',')
        .build(file);
    writer.write(batch)?;

    debug!(
        "wrote {} ({} rows)",
        output_path.display(),
        batch.num_rows()
    );
    Ok(())
}
