//! Slack Web API gateway. Implements ChatSource and ProfilePort.

use crate::adapters::slack::mapper::{
    ChannelInfo, HistoryPage, ProfileEnvelope, api_error, message_to_domain, profile_to_domain,
};
use crate::domain::{DomainError, Message, Profile};
use crate::ports::{ChatSource, ProfilePort};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Messages requested per `conversations.history` page.
const HISTORY_PAGE_LIMIT: &str = "200";
/// Upper bound on pages fetched for one history call.
const MAX_HISTORY_PAGES: usize = 50;

/// Slack bot-token client.
///
/// All calls are GETs against `{api_url}/{method}` with a bearer token. Slack
/// answers HTTP 200 with `ok: false` on API errors, so the envelope is
/// checked before decoding the body.
pub struct SlackGateway {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl SlackGateway {
    /// # Arguments
    /// * `api_url` - Web API base (e.g. "https://slack.com/api")
    /// * `token` - Bot token with `channels:history`, `channels:read`, `users.profile:read`
    pub fn new(api_url: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_url, method)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, &str)],
        kind: fn(String) -> DomainError,
    ) -> Result<T, DomainError> {
        debug!(method, "calling Slack API");
        let response = self
            .client
            .get(self.method_url(method))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| kind(format!("{}: request failed: {}", method, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(kind(format!(
                "{}: HTTP {}: {}",
                method,
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| kind(format!("{}: invalid JSON: {}", method, e)))?;

        if !body.get("ok").and_then(|v| v.as_bool()).unwrap_or(false) {
            let code = body
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown_error");
            return Err(api_error(method, code, kind));
        }

        serde_json::from_value(body)
            .map_err(|e| kind(format!("{}: unexpected payload: {}", method, e)))
    }
}

#[async_trait::async_trait]
impl ChatSource for SlackGateway {
    async fn fetch_channel_history(&self, channel_id: &str) -> Result<Vec<Message>, DomainError> {
        let mut messages = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_HISTORY_PAGES {
            let mut query = vec![("channel", channel_id), ("limit", HISTORY_PAGE_LIMIT)];
            if let Some(c) = cursor.as_deref() {
                query.push(("cursor", c));
            }
            let page: HistoryPage = self
                .call("conversations.history", &query, DomainError::Chat)
                .await?;
            let next = page.next_cursor().map(String::from);
            messages.extend(page.messages.into_iter().map(message_to_domain));

            match next {
                Some(c) => cursor = Some(c),
                None => break,
            }
        }

        info!(channel_id, count = messages.len(), "fetched channel history");
        Ok(messages)
    }

    async fn fetch_channel_name(&self, channel_id: &str) -> Result<String, DomainError> {
        let info: ChannelInfo = self
            .call(
                "conversations.info",
                &[("channel", channel_id)],
                DomainError::Chat,
            )
            .await?;
        Ok(info.channel.name)
    }
}

#[async_trait::async_trait]
impl ProfilePort for SlackGateway {
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, DomainError> {
        let envelope: ProfileEnvelope = self
            .call(
                "users.profile.get",
                &[("user", user_id)],
                DomainError::Profile,
            )
            .await?;
        Ok(profile_to_domain(envelope.profile))
    }
}
