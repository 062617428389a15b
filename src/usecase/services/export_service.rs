use std::path::Path;

use anyhow::Result;

use crate::domain::entities::column::ColumnDef;
use crate::domain::entities::record::Record;
use crate::infra::export::csv::{export_records_to_csv, ExportResult};

pub struct ExportService;

impl ExportService {
    pub fn export_csv(
        &self,
        path: &Path,
        columns: &[ColumnDef],
        rows: &[Record],
    ) -> Result<ExportResult> {
        let result = export_records_to_csv(path, columns, rows)?;
        tracing::info!(
            path = %path.display(),
            rows = result.row_count,
            columns = result.column_count,
            "exported rows to csv"
        );
        Ok(result)
    }
}

pub fn default_export_file_name(title: &[String]) -> String {
    let stem = title
        .last()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .unwrap_or("export");
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M");
    format!("{stem}-{stamp}.csv")
}
