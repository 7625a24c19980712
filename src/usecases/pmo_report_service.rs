//! PMO report: per-member message counts and blocker indicators.

use crate::domain::report::{aggregate, distinct_authors, summarize_blockers};
use crate::domain::{DomainError, PmoReport};
use crate::ports::{ChatSource, ProfilePort, RenderPort};
use crate::shared::ReportConfig;
use crate::usecases::history_service::load_history;
use crate::usecases::profiles::ProfileCache;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct PmoReportService {
    chat: Arc<dyn ChatSource>,
    profiles: Arc<dyn ProfilePort>,
    renderer: Arc<dyn RenderPort>,
}

impl PmoReportService {
    pub fn new(
        chat: Arc<dyn ChatSource>,
        profiles: Arc<dyn ProfilePort>,
        renderer: Arc<dyn RenderPort>,
    ) -> Self {
        Self {
            chat,
            profiles,
            renderer,
        }
    }

    /// One aggregation pass. Profiles are fetched once per distinct author,
    /// in first-seen order.
    pub async fn build(&self, cfg: &ReportConfig) -> PmoReport {
        let (messages, _) = load_history(self.chat.as_ref(), &cfg.channel_id).await;

        let mut cache = ProfileCache::new(Arc::clone(&self.profiles));
        for user_id in distinct_authors(&messages) {
            cache.resolve(user_id).await;
        }

        let members = aggregate(&messages, cache.profiles());
        let total_blockers = summarize_blockers(&messages);
        info!(
            channel_id = %cfg.channel_id,
            members = members.len(),
            total_blockers,
            "PMO report built"
        );

        PmoReport {
            members,
            total_blockers,
            warn_missing: cache.warn_missing(),
        }
    }

    pub async fn render(&self, cfg: &ReportConfig) -> Result<PathBuf, DomainError> {
        let report = self.build(cfg).await;
        self.renderer.render_pmo_report(&report).await
    }
}
