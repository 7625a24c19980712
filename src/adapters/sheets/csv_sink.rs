//! CSV file sink. Implements SheetSink when no Sheets token is configured.
//!
//! Uses the `csv` crate so multi-line cells are quoted safely.

use crate::domain::DomainError;
use crate::ports::SheetSink;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Writes `{dir}/{sheet_key}_{worksheet}.csv`, replacing any previous file.
pub struct CsvSheetSink {
    dir: PathBuf,
}

impl CsvSheetSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Target file for a sheet/worksheet pair. Characters outside
    /// `[A-Za-z0-9_-]` become `_`.
    pub fn table_path(&self, sheet_key: &str, worksheet: &str) -> PathBuf {
        let name: String = format!("{}_{}", sheet_key, worksheet)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.csv", name))
    }
}

/// Serialize rows to CSV bytes.
pub fn rows_to_csv(rows: &[Vec<String>]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_writer(Vec::new());
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    wtr.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            e.to_string(),
        ))
    })
}

#[async_trait::async_trait]
impl SheetSink for CsvSheetSink {
    async fn write_table(
        &self,
        sheet_key: &str,
        worksheet: &str,
        rows: &[Vec<String>],
    ) -> Result<(), DomainError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::Sink(format!("create export dir: {}", e)))?;
        let bytes =
            rows_to_csv(rows).map_err(|e| DomainError::Sink(format!("CSV encode: {}", e)))?;
        let path = self.table_path(sheet_key, worksheet);
        fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::Sink(format!("write {}: {}", path.display(), e)))?;
        info!(path = %path.display(), rows = rows.len(), "wrote table to CSV");
        Ok(())
    }
}
