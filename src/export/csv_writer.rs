use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::extractors::amazon::models::ProductRecord;

pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `records` as a UTF-8 (with BOM) CSV file, header first.
/// Absent fields are written as `NonePublished`.
pub fn write_records(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    file.write_all(UTF8_BOM)
        .context("Failed to write CSV byte order mark")?;

    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write record {}", record.asin))?;
    }
    writer.flush().context("Failed to flush CSV file")?;

    Ok(())
}
