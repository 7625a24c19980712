//! Standup sheet export: channel history -> parsed, normalized table ->
//! spreadsheet sink -> rendered view.
//!
//! Provider failures degrade to empty data; a sink failure aborts the export.

use crate::domain::report::{STANDUP_COLUMNS, format_local_time, standup_row};
use crate::domain::{DomainError, ExportSummary, ReportTable};
use crate::ports::{ChatSource, ProfilePort, RenderPort, SheetSink};
use crate::shared::ReportConfig;
use crate::usecases::history_service::{UNKNOWN_AUTHOR, load_channel_name, load_history};
use crate::usecases::profiles::ProfileCache;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct ExportService {
    chat: Arc<dyn ChatSource>,
    profiles: Arc<dyn ProfilePort>,
    sink: Arc<dyn SheetSink>,
    renderer: Arc<dyn RenderPort>,
}

impl ExportService {
    pub fn new(
        chat: Arc<dyn ChatSource>,
        profiles: Arc<dyn ProfilePort>,
        sink: Arc<dyn SheetSink>,
        renderer: Arc<dyn RenderPort>,
    ) -> Self {
        Self {
            chat,
            profiles,
            sink,
            renderer,
        }
    }

    /// Build the table and overwrite the configured worksheet with it.
    pub async fn export(&self, cfg: &ReportConfig) -> Result<ExportSummary, DomainError> {
        let (messages, error) = load_history(self.chat.as_ref(), &cfg.channel_id).await;
        let (_, mut warn_missing) = load_channel_name(self.chat.as_ref(), &cfg.channel_id).await;

        let mut cache = ProfileCache::new(Arc::clone(&self.profiles));
        let mut table = ReportTable::with_headers(STANDUP_COLUMNS);
        for msg in &messages {
            let user_name = match msg.author_id.as_deref() {
                Some(id) => cache.display_name(id).await,
                None => UNKNOWN_AUTHOR.to_string(),
            };
            let time = msg.timestamp.and_then(format_local_time);
            table.push_row(standup_row(time.as_deref(), &user_name, &msg.raw_text));
        }
        warn_missing |= cache.warn_missing();

        self.sink
            .write_table(&cfg.sheet_key, &cfg.worksheet_name, &table.to_rows())
            .await?;
        info!(
            sheet_key = %cfg.sheet_key,
            worksheet = %cfg.worksheet_name,
            rows = table.row_count(),
            "standup table exported"
        );

        Ok(ExportSummary {
            table,
            error,
            warn_missing,
        })
    }

    /// Export, then render the table view.
    pub async fn export_and_render(&self, cfg: &ReportConfig) -> Result<PathBuf, DomainError> {
        let summary = self.export(cfg).await?;
        self.renderer
            .render_table(&summary.table, summary.error.as_deref(), summary.warn_missing)
            .await
    }
}
