use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::column::ColumnDef;
use crate::domain::entities::record::{display_value, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportResult {
    pub row_count: usize,
    pub column_count: usize,
}

pub fn write_records<W: Write>(
    writer: W,
    columns: &[ColumnDef],
    rows: &[Record],
) -> Result<ExportResult> {
    if columns.is_empty() {
        anyhow::bail!("at least one column is required to export")
    }

    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(columns.iter().map(|column| column.label.as_str()))
        .context("failed to write csv header")?;

    for row in rows {
        writer
            .write_record(
                columns
                    .iter()
                    .map(|column| display_value(row, &column.field_name)),
            )
            .context("failed to write csv record")?;
    }
    writer.flush().context("failed to flush csv writer")?;

    Ok(ExportResult {
        row_count: rows.len(),
        column_count: columns.len(),
    })
}

pub fn export_records_to_csv(
    csv_path: &Path,
    columns: &[ColumnDef],
    rows: &[Record],
) -> Result<ExportResult> {
    let file = std::fs::File::create(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    write_records(file, columns, rows)
}
