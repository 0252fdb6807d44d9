//! The cleaning transform: column selection, sentinel recoding,
//! identifier-preserving type inference, comma-separated output.

mod convert;
mod paths;
mod read;
mod schema;
mod write;

pub use convert::convert_types;
pub use paths::{derive_output_path, OutputPolicy};
pub use read::read_table;
pub use schema::infer_schema;
pub use write::write_table;

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::CleanResult;

/// Raw token the census exports use for a suppressed value.
pub const SENTINEL: &str = "X";

/// Header variants of the census-sector identifier. Always read as text so
/// leading zeros survive.
pub const SECTOR_ID_COLUMNS: [&str; 2] = ["CD_SETOR", "CD_setor"];

/// How a single input file is parsed.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field separator of the input file.
    pub delimiter: u8,
    /// Quote character of the input file.
    pub quote: u8,
    /// Columns to materialize, in this order. Empty keeps every column.
    pub columns: Vec<String>,
    /// Columns exempt from numeric inference.
    pub text_columns: Vec<String>,
    /// Raw cell value recorded as missing.
    pub sentinel: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            quote: b'"',
            columns: Vec::new(),
            text_columns: Vec::new(),
            sentinel: SENTINEL.to_string(),
        }
    }
}

impl ReadOptions {
    /// Options for a censo export: `;`-separated, `"`-quoted, `X` as the
    /// missing marker, keeping `columns` (empty keeps all) with the sector
    /// identifier forced to text.
    pub fn censo(columns: Vec<String>) -> Self {
        let text_columns = if columns.is_empty() {
            SECTOR_ID_COLUMNS.iter().map(|c| c.to_string()).collect()
        } else {
            columns
                .iter()
                .filter(|c| SECTOR_ID_COLUMNS.contains(&c.as_str()))
                .cloned()
                .collect()
        };
        Self {
            columns,
            text_columns,
            ..Self::default()
        }
    }
}

/// Counts and destination for one successfully cleaned file.
#[derive(Debug)]
pub struct CleanSummary {
    pub output_path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// One file to clean.
#[derive(Debug)]
pub struct CleanJob {
    pub input: PathBuf,
    pub options: ReadOptions,
    pub policy: OutputPolicy,
}

/// Per-file result collected by the batch loop.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: CleanResult<CleanSummary>,
}

/// Clean one file: parse, infer final column types, and write the result
/// to the path derived by `policy`. A failed parse produces no output file.
pub fn clean_file(
    input: &Path,
    options: &ReadOptions,
    policy: &OutputPolicy,
) -> CleanResult<CleanSummary> {
    let raw = read_table(input, options)?;
    let schema = infer_schema(&raw, &options.text_columns);
    let table = convert_types(&raw, &schema)?;

    let output_path = derive_output_path(input, policy)?;
    write_table(&table, &output_path)?;

    Ok(CleanSummary {
        output_path,
        rows: table.num_rows(),
        columns: table.num_columns(),
    })
}

/// Clean every job in order. A failed file is recorded and the loop moves
/// on; an empty job list is a normal zero-file run.
pub fn clean_all(jobs: Vec<CleanJob>) -> Vec<FileOutcome> {
    let mut outcomes = Vec::with_capacity(jobs.len());
    for job in jobs {
        let result = clean_file(&job.input, &job.options, &job.policy);
        match &result {
            Ok(summary) => info!(
                "cleaned {} -> {} ({} rows)",
                job.input.display(),
                summary.output_path.display(),
                summary.rows
            ),
            Err(e) => error!("cleaning {} failed: {}", job.input.display(), e),
        }
        outcomes.push(FileOutcome {
            input: job.input,
            result,
        });
    }
    outcomes
}
