//! Dataset loading for `;`-delimited news tables.

use std::{fs::File, path::Path};

use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::{data::Table, error::DataError};

pub const DELIMITER: u8 = b';';

/// Read `path` into a [`Table`], skipping malformed lines and dropping rows
/// whose `required` field is blank.
pub fn load_table(path: &Path, required: &str) -> Result<Table, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_reader(file, required)
}

/// What the loader dropped while reading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Source line (1-based, header is line 1) of every skipped record.
    pub skipped_lines: Vec<u64>,
    /// Rows excluded because the required field was blank.
    pub blank: usize,
}

/// Same as [`load_table`] over any reader.
pub fn load_from_reader<R: std::io::Read>(input: R, required: &str) -> Result<Table, DataError> {
    load_with_stats(input, required).map(|(table, _)| table)
}

/// Load and also report which lines were skipped.
pub fn load_with_stats<R: std::io::Read>(
    input: R,
    required: &str,
) -> Result<(Table, LoadStats), DataError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let required_idx = headers
        .iter()
        .position(|h| h == required)
        .ok_or_else(|| DataError::MissingColumn(required.to_string()))?;

    let width = headers.len();
    let mut table = Table::new(headers);
    let mut stats = LoadStats::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or(0);
                warn!(line, %err, "skipping unparsable line");
                stats.skipped_lines.push(line);
                continue;
            }
        };
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            warn!(
                line,
                fields = record.len(),
                expected = width,
                "skipping line with too many fields"
            );
            stats.skipped_lines.push(line);
            continue;
        }
        let keep = record
            .get(required_idx)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);
        if !keep {
            stats.blank += 1;
            continue;
        }
        table.push_row(record.iter().map(|v| v.to_string()).collect());
    }

    info!(
        rows = table.len(),
        skipped = stats.skipped_lines.len(),
        blank = stats.blank,
        column = required,
        "loaded dataset"
    );
    Ok((table, stats))
}
