//! Member timeline: one author's messages labeled by report day.

use crate::domain::report::{local_date, report_label};
use crate::domain::{DomainError, MemberMessage, MemberReport};
use crate::ports::{ChatSource, ProfilePort, RenderPort};
use crate::shared::ReportConfig;
use crate::usecases::history_service::load_history;
use crate::usecases::profiles::ProfileCache;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct MemberService {
    chat: Arc<dyn ChatSource>,
    profiles: Arc<dyn ProfilePort>,
    renderer: Arc<dyn RenderPort>,
}

impl MemberService {
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

    /// Messages by `user_id`, labeled relative to the local current date.
    pub async fn messages(&self, cfg: &ReportConfig, user_id: &str) -> MemberReport {
        self.messages_as_of(cfg, user_id, Local::now().date_naive())
            .await
    }

    /// Same as [`Self::messages`] with an explicit "today".
    pub async fn messages_as_of(
        &self,
        cfg: &ReportConfig,
        user_id: &str,
        today: NaiveDate,
    ) -> MemberReport {
        let (history, _) = load_history(self.chat.as_ref(), &cfg.channel_id).await;

        let messages: Vec<MemberMessage> = history
            .into_iter()
            .enumerate()
            .filter(|(_, m)| m.author_id.as_deref() == Some(user_id))
            .map(|(idx, m)| MemberMessage {
                id: format!("msg-{}", idx),
                label: report_label(m.timestamp.and_then(local_date), today),
                raw_text: m.raw_text,
            })
            .collect();

        let mut cache = ProfileCache::new(Arc::clone(&self.profiles));
        let user_name = cache.display_name(user_id).await;
        let avatar_ref = cache.resolve(user_id).await.avatar_ref;

        info!(user_id, count = messages.len(), "member messages collected");

        MemberReport {
            user_id: user_id.to_string(),
            user_name,
            avatar_ref,
            messages,
        }
    }

    pub async fn render(&self, cfg: &ReportConfig, user_id: &str) -> Result<PathBuf, DomainError> {
        let report = self.messages(cfg, user_id).await;
        self.renderer.render_member_report(&report).await
    }
}
