use polars::prelude::*;

use crate::errors::FitsLoaderError;
use crate::fits::{CardValue, FitsFile};
use crate::loader::FitsLoader;

pub const FILE_NAME_COLUMN: &str = "file_name";

/// Numeric keys become nullable `Float64` columns, anything else a
/// nullable `String` column.
fn header_column(name: &str, values: &[Option<CardValue>]) -> Column {
    let numeric = values.iter().flatten().all(|v| v.as_float().is_some());
    if numeric {
        let floats: Vec<Option<f64>> = values
            .iter()
            .map(|v| v.as_ref().and_then(CardValue::as_float))
            .collect();
        Column::new(name.into(), floats)
    } else {
        let text: Vec<Option<String>> = values
            .iter()
            .map(|v| v.as_ref().map(CardValue::to_string))
            .collect();
        Column::new(name.into(), text)
    }
}

impl FitsLoader {
    /// One row per readable matching file: its file name followed by the
    /// value of each of `keys` in its primary header (null when absent).
    /// Unreadable files are logged and left out.
    pub fn header_table<S: AsRef<str>>(&self, keys: &[S]) -> Result<DataFrame, FitsLoaderError> {
        let files = self.matching_files()?;
        if files.is_empty() {
            return Err(FitsLoaderError::NoMatchingFiles {
                dir: self.folder().to_path_buf(),
                suffix: self.config().suffix.clone(),
            });
        }
        let mut file_names = Vec::with_capacity(files.len());
        let mut values: Vec<Vec<Option<CardValue>>> = vec![Vec::with_capacity(files.len()); keys.len()];
        for path in &files {
            let header = match FitsFile::open_header(path) {
                Ok(h) => h,
                Err(e) => {
                    log::warn!("Error reading {}: {}", path.display(), e);
                    continue;
                }
            };
            file_names.push(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            for (column, key) in values.iter_mut().zip(keys) {
                column.push(header.get(key.as_ref()).cloned());
            }
        }
        let mut columns = Vec::with_capacity(keys.len() + 1);
        columns.push(Column::new(FILE_NAME_COLUMN.into(), file_names));
        for (key, column) in keys.iter().zip(&values) {
            columns.push(header_column(key.as_ref(), column));
        }
        Ok(DataFrame::new(columns)?)
    }
}
