use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{CleanError, CleanResult};

/// How an output file path is derived from an input file path.
#[derive(Debug, Clone)]
pub enum OutputPolicy {
    /// Same directory, `<stem><suffix>.<ext>`.
    Suffix(String),
    /// Same file name under a separate root, created when absent.
    Directory(PathBuf),
}

impl OutputPolicy {
    /// The conventional `_filter` suffix of a curated-columns run.
    pub fn filter_suffix() -> Self {
        OutputPolicy::Suffix("_filter".to_string())
    }
}

pub fn derive_output_path(input: &Path, policy: &OutputPolicy) -> CleanResult<PathBuf> {
    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CleanError::Io {
            path: input.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "input path has no file name",
            ),
        })?;

    match policy {
        OutputPolicy::Suffix(suffix) => {
            let name = match file_name.rsplit_once('.') {
                Some((stem, ext)) => format!("{}{}.{}", stem, suffix, ext),
                None => format!("{}{}", file_name, suffix),
            };
            Ok(input.with_file_name(name))
        }
        OutputPolicy::Directory(out_dir) => {
            fs::create_dir_all(out_dir).map_err(|source| CleanError::Io {
                path: out_dir.clone(),
                source,
            })?;
            Ok(out_dir.join(file_name))
        }
    }
}
