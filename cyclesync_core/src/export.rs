//! CSV export of cycle history for sharing outside the app.

use crate::{CycleRecord, Result};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: u64,
    start: String,
    end: String,
    length: i64,
    fertile_start: i64,
    fertile_end: i64,
}

impl From<&CycleRecord> for CsvRow {
    fn from(record: &CycleRecord) -> Self {
        CsvRow {
            id: record.id,
            start: record.start.to_string(),
            end: record.end.to_string(),
            length: record.length,
            fertile_start: record.fertile_window.start_day,
            fertile_end: record.fertile_window.end_day,
        }
    }
}

/// Write the full cycle history to a CSV file with headers
///
/// The file is synced to disk before returning. Returns the number of
/// records written.
pub fn export_cycles_csv(cycles: &[CycleRecord], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for record in cycles {
        writer.serialize(CsvRow::from(record))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} cycles to {:?}", cycles.len(), path);
    Ok(cycles.len())
}
