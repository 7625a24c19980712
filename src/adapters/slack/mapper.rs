//! Map Slack Web API payloads to domain entities.

use crate::domain::{DomainError, Message, Profile};
use serde::Deserialize;

/// Slack error code for a token without the required OAuth scope.
pub const MISSING_SCOPE: &str = "missing_scope";

/// `conversations.history` page.
#[derive(Debug, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub messages: Vec<SlackMessage>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

impl HistoryPage {
    /// Cursor for the next page, if the provider returned a non-empty one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()
            .map(|m| m.next_cursor.as_str())
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

#[derive(Debug, Deserialize)]
pub struct SlackMessage {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
}

/// `conversations.info` body.
#[derive(Debug, Deserialize)]
pub struct ChannelInfo {
    pub channel: ChannelBody,
}

#[derive(Debug, Deserialize)]
pub struct ChannelBody {
    pub name: String,
}

/// `users.profile.get` body.
#[derive(Debug, Deserialize)]
pub struct ProfileEnvelope {
    pub profile: SlackProfile,
}

#[derive(Debug, Deserialize)]
pub struct SlackProfile {
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub image_192: Option<String>,
    #[serde(default)]
    pub image_72: Option<String>,
}

/// Slack `ts` ("1700000000.000100") to unix seconds.
pub fn parse_ts(ts: &str) -> Option<i64> {
    ts.split('.').next()?.parse().ok()
}

pub fn message_to_domain(msg: SlackMessage) -> Message {
    Message {
        author_id: msg.user.filter(|u| !u.is_empty()),
        timestamp: msg.ts.as_deref().and_then(parse_ts),
        raw_text: msg.text.unwrap_or_default(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Display name is `real_name`; avatar prefers the 192px image over 72px.
pub fn profile_to_domain(profile: SlackProfile) -> Profile {
    Profile {
        display_name: non_empty(profile.real_name),
        avatar_ref: non_empty(profile.image_192).or_else(|| non_empty(profile.image_72)),
    }
}

/// Map an `ok: false` answer. Missing scopes are kept distinguishable;
/// everything else goes through `other`.
pub fn api_error(method: &str, code: &str, other: fn(String) -> DomainError) -> DomainError {
    if code == MISSING_SCOPE {
        DomainError::MissingPermission(format!("{}: {}", method, code))
    } else {
        other(format!("{}: {}", method, code))
    }
}
