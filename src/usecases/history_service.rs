//! Channel history view: every message enriched with its author's profile.

use crate::domain::report::format_local_time;
use crate::domain::{ChannelHistory, DomainError, EnrichedMessage, Message};
use crate::ports::{ChatSource, ProfilePort, RenderPort};
use crate::shared::ReportConfig;
use crate::usecases::profiles::ProfileCache;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Name shown for messages without an author (bots, system events).
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Fetch history, downgrading provider failures to an empty list plus an
/// error string for the view.
pub(crate) async fn load_history(
    chat: &dyn ChatSource,
    channel_id: &str,
) -> (Vec<Message>, Option<String>) {
    match chat.fetch_channel_history(channel_id).await {
        Ok(messages) => (messages, None),
        Err(e) => {
            error!(channel_id, error = %e, "history fetch failed, continuing with no messages");
            (Vec::new(), Some(e.to_string()))
        }
    }
}

/// Channel name, or `None` with the missing-permission flag when it can't be
/// read.
pub(crate) async fn load_channel_name(
    chat: &dyn ChatSource,
    channel_id: &str,
) -> (Option<String>, bool) {
    match chat.fetch_channel_name(channel_id).await {
        Ok(name) => (Some(name), false),
        Err(e) => {
            warn!(channel_id, error = %e, "channel info unavailable");
            (None, e.is_missing_permission())
        }
    }
}

pub struct HistoryService {
    chat: Arc<dyn ChatSource>,
    profiles: Arc<dyn ProfilePort>,
    renderer: Arc<dyn RenderPort>,
}

impl HistoryService {
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

    pub async fn history(&self, cfg: &ReportConfig) -> ChannelHistory {
        let (messages, error) = load_history(self.chat.as_ref(), &cfg.channel_id).await;
        let (channel_name, mut warn_missing) =
            load_channel_name(self.chat.as_ref(), &cfg.channel_id).await;

        let mut cache = ProfileCache::new(Arc::clone(&self.profiles));
        let mut enriched = Vec::with_capacity(messages.len());
        for msg in messages {
            let (user_name, avatar_ref) = match msg.author_id.as_deref() {
                Some(id) => {
                    let name = cache.display_name(id).await;
                    (name, cache.resolve(id).await.avatar_ref)
                }
                None => (UNKNOWN_AUTHOR.to_string(), None),
            };
            enriched.push(EnrichedMessage {
                author_id: msg.author_id,
                user_name,
                avatar_ref,
                time: msg.timestamp.and_then(format_local_time),
                text: msg.raw_text,
            });
        }
        warn_missing |= cache.warn_missing();

        info!(
            channel_id = %cfg.channel_id,
            count = enriched.len(),
            warn_missing,
            "channel history assembled"
        );

        ChannelHistory {
            channel_name: channel_name.unwrap_or_else(|| cfg.channel_id.clone()),
            messages: enriched,
            error,
            warn_missing,
        }
    }

    /// Build the history view and hand it to the renderer.
    pub async fn render(&self, cfg: &ReportConfig) -> Result<PathBuf, DomainError> {
        let history = self.history(cfg).await;
        self.renderer.render_history(&history).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::testing::{FakeChat, FakeProfiles, FakeRenderer};

    fn cfg() -> ReportConfig {
        ReportConfig {
            channel_id: "C1".into(),
            sheet_key: "key".into(),
            worksheet_name: "Sheet1".into(),
        }
    }

    #[tokio::test]
    async fn test_history_enriches_messages() {
        let chat = Arc::new(FakeChat::with_messages(vec![
            Message::new("U1", 1_704_067_200, "hi"),
            Message {
                author_id: None,
                timestamp: None,
                raw_text: "bot".into(),
            },
            Message::new("U1", 1_704_067_300, "again"),
        ]));
        let profiles = Arc::new(FakeProfiles::with_names(&[("U1", "Ana")]));
        let svc = HistoryService::new(chat, profiles.clone(), Arc::new(FakeRenderer::default()));

        let history = svc.history(&cfg()).await;
        assert_eq!(history.channel_name, "standup");
        assert_eq!(history.messages.len(), 3);
        assert_eq!(history.messages[0].user_name, "Ana");
        assert_eq!(
            history.messages[0].avatar_ref.as_deref(),
            Some("https://avatars/U1.png")
        );
        assert!(history.messages[0].time.is_some());
        assert_eq!(history.messages[1].user_name, UNKNOWN_AUTHOR);
        assert_eq!(history.messages[1].time, None);
        assert_eq!(profiles.calls(), 1);
        assert!(history.error.is_none());
        assert!(!history.warn_missing);
    }

    #[tokio::test]
    async fn test_history_failure_is_empty_with_error() {
        let chat = Arc::new(FakeChat {
            history_error: Some("not_in_channel".into()),
            name_missing_scope: true,
            ..Default::default()
        });
        let svc = HistoryService::new(
            chat,
            Arc::new(FakeProfiles::default()),
            Arc::new(FakeRenderer::default()),
        );

        let history = svc.history(&cfg()).await;
        assert!(history.messages.is_empty());
        assert!(history.error.unwrap().contains("not_in_channel"));
        assert_eq!(history.channel_name, "C1");
        assert!(history.warn_missing);
    }

    #[tokio::test]
    async fn test_profile_missing_scope_sets_flag() {
        let chat = Arc::new(FakeChat::with_messages(vec![Message::new("U1", 0, "x")]));
        let svc = HistoryService::new(
            chat,
            Arc::new(FakeProfiles::missing_scope()),
            Arc::new(FakeRenderer::default()),
        );
        let history = svc.history(&cfg()).await;
        assert_eq!(history.messages[0].user_name, "<@U1>");
        assert!(history.warn_missing);
    }
}
