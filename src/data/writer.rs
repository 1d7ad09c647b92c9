//! Serialization of the augmented table.

use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::{
    data::{reader::DELIMITER, Table},
    error::DataError,
};

/// Write `table` to `path`, removing any file already there first.
pub fn write_table(table: &Table, path: &Path) -> Result<(), DataError> {
    let io_err = |source| DataError::Io {
        path: path.display().to_string(),
        source,
    };
    if path.exists() {
        std::fs::remove_file(path).map_err(io_err)?;
        info!(path = %path.display(), "removed existing output file");
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Necessary)
        .from_path(path)?;
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush().map_err(io_err)?;
    info!(path = %path.display(), rows = table.len(), "wrote dataset");
    Ok(())
}
