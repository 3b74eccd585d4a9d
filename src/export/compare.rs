use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv_async::AsyncReaderBuilder;
use futures::stream::StreamExt;
use tokio::fs::File as AsyncFile;
use tokio::io::BufReader;

use crate::export::csv_writer::UTF8_BOM;
use crate::extractors::amazon::models::SENTINEL;

/// Written as the old value when the previous file lacks a column.
pub const MISSING_COLUMN: &str = "N/A";

/// A CSV file loaded into memory; empty cells already read as `NonePublished`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| if cell.is_empty() { SENTINEL.to_string() } else { cell })
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDifference {
    pub column: String,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDifferences {
    pub link: String,
    pub differences: Vec<FieldDifference>,
}

/// Loads a CSV file written by a previous run.
pub async fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let file = AsyncFile::open(path)
        .await
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .flexible(true)
        .create_reader(BufReader::new(file));

    let headers: Vec<String> = csv_reader
        .headers()
        .await
        .context("Failed to read CSV headers")?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    let mut records = csv_reader.records();
    while let Some(record) = records.next().await {
        let record = record.context("Failed to read CSV record")?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(CsvTable::new(headers, rows))
}

/// For every link present in both tables (in `new` order), the columns of
/// `new` whose value changed.
pub fn diff_tables(old: &CsvTable, new: &CsvTable) -> Result<Vec<RowDifferences>> {
    let old_link = old.column("link").context("Previous CSV has no link column")?;
    let new_link = new.column("link").context("New CSV has no link column")?;

    let mut old_rows: HashMap<&str, &Vec<String>> = HashMap::new();
    for row in &old.rows {
        if let Some(link) = row.get(old_link) {
            old_rows.entry(link.as_str()).or_insert(row);
        }
    }

    let mut compared: Vec<&str> = Vec::new();
    let mut report = Vec::new();

    for new_row in &new.rows {
        let Some(link) = new_row.get(new_link).map(String::as_str) else {
            continue;
        };
        if compared.contains(&link) {
            continue;
        }
        let Some(old_row) = old_rows.get(link) else {
            continue;
        };
        compared.push(link);

        let differences: Vec<FieldDifference> = new
            .headers
            .iter()
            .enumerate()
            .filter_map(|(index, column)| {
                let new_value = cell(new_row, index);
                let old_value = match old.column(column) {
                    Some(old_index) => cell(old_row, old_index),
                    None => MISSING_COLUMN.to_string(),
                };
                (old_value != new_value).then(|| FieldDifference {
                    column: column.clone(),
                    old: old_value,
                    new: new_value,
                })
            })
            .collect();

        if !differences.is_empty() {
            report.push(RowDifferences {
                link: link.to_string(),
                differences,
            });
        }
    }

    Ok(report)
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index)
        .cloned()
        .unwrap_or_else(|| SENTINEL.to_string())
}

/// One line per changed field: link, column, old value, new value.
pub fn difference_rows(report: &[RowDifferences]) -> Vec<Vec<String>> {
    report
        .iter()
        .flat_map(|row| {
            row.differences.iter().map(move |difference| {
                vec![
                    row.link.clone(),
                    difference.column.clone(),
                    difference.old.clone(),
                    difference.new.clone(),
                ]
            })
        })
        .collect()
}

/// Writes one row per link with `<column>_old` / `<column>_new` pairs,
/// UTF-8 with BOM like the product export.
pub fn write_differences(path: &Path, report: &[RowDifferences]) -> Result<()> {
    let mut columns: Vec<String> = vec!["link".to_string()];
    for row in report {
        for difference in &row.differences {
            for column in [
                format!("{}_old", difference.column),
                format!("{}_new", difference.column),
            ] {
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create differences file {}", path.display()))?;
    file.write_all(UTF8_BOM)
        .context("Failed to write CSV byte order mark")?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&columns)?;

    for row in report {
        let mut values: HashMap<String, &str> = HashMap::new();
        for difference in &row.differences {
            values.insert(format!("{}_old", difference.column), &difference.old);
            values.insert(format!("{}_new", difference.column), &difference.new);
        }
        let record: Vec<&str> = columns
            .iter()
            .map(|column| {
                if column == "link" {
                    row.link.as_str()
                } else {
                    values.get(column).copied().unwrap_or("")
                }
            })
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush().context("Failed to flush differences file")?;

    Ok(())
}
