//! In-memory port implementations for use-case tests.

use crate::domain::{
    ChannelHistory, DomainError, MemberReport, Message, PmoReport, Profile, ReportTable,
};
use crate::ports::{ChatSource, ProfilePort, RenderPort, SheetSink};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct FakeChat {
    pub messages: Vec<Message>,
    pub history_error: Option<String>,
    pub channel_name: Option<String>,
    pub name_missing_scope: bool,
}

impl FakeChat {
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            channel_name: Some("standup".to_string()),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl ChatSource for FakeChat {
    async fn fetch_channel_history(&self, _channel_id: &str) -> Result<Vec<Message>, DomainError> {
        match &self.history_error {
            Some(e) => Err(DomainError::Chat(e.clone())),
            None => Ok(self.messages.clone()),
        }
    }

    async fn fetch_channel_name(&self, _channel_id: &str) -> Result<String, DomainError> {
        if self.name_missing_scope {
            return Err(DomainError::MissingPermission("missing_scope".to_string()));
        }
        self.channel_name
            .clone()
            .ok_or_else(|| DomainError::Chat("channel_not_found".to_string()))
    }
}

#[derive(Default)]
pub struct FakeProfiles {
    names: HashMap<String, String>,
    missing_scope: bool,
    calls: AtomicUsize,
}

impl FakeProfiles {
    /// Known users resolve to a name and `https://avatars/{id}.png`; unknown
    /// users fail with a plain lookup error.
    pub fn with_names(names: &[(&str, &str)]) -> Self {
        Self {
            names: names
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn missing_scope() -> Self {
        Self {
            missing_scope: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProfilePort for FakeProfiles {
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.missing_scope {
            return Err(DomainError::MissingPermission("missing_scope".to_string()));
        }
        match self.names.get(user_id) {
            Some(name) => Ok(Profile {
                display_name: Some(name.clone()),
                avatar_ref: Some(format!("https://avatars/{}.png", user_id)),
            }),
            None => Err(DomainError::Profile("user_not_found".to_string())),
        }
    }
}

#[derive(Default)]
pub struct FakeSink {
    pub fail: bool,
    pub writes: Mutex<Vec<(String, String, Vec<Vec<String>>)>>,
}

impl FakeSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn last_write(&self) -> Option<(String, String, Vec<Vec<String>>)> {
        self.writes.lock().ok()?.last().cloned()
    }
}

#[async_trait::async_trait]
impl SheetSink for FakeSink {
    async fn write_table(
        &self,
        sheet_key: &str,
        worksheet: &str,
        rows: &[Vec<String>],
    ) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::Sink("quota exceeded".to_string()));
        }
        if let Ok(mut w) = self.writes.lock() {
            w.push((sheet_key.to_string(), worksheet.to_string(), rows.to_vec()));
        }
        Ok(())
    }
}

/// Counts renders and returns a fixed path per view.
#[derive(Default)]
pub struct FakeRenderer {
    pub renders: AtomicUsize,
}

impl FakeRenderer {
    fn hit(&self, name: &str) -> Result<PathBuf, DomainError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        Ok(PathBuf::from(name))
    }
}

#[async_trait::async_trait]
impl RenderPort for FakeRenderer {
    async fn render_table(
        &self,
        _table: &ReportTable,
        _error: Option<&str>,
        _warn_missing: bool,
    ) -> Result<PathBuf, DomainError> {
        self.hit("table.md")
    }

    async fn render_pmo_report(&self, _report: &PmoReport) -> Result<PathBuf, DomainError> {
        self.hit("pmo.md")
    }

    async fn render_member_report(&self, _report: &MemberReport) -> Result<PathBuf, DomainError> {
        self.hit("member.md")
    }

    async fn render_history(&self, _history: &ChannelHistory) -> Result<PathBuf, DomainError> {
        self.hit("history.md")
    }
}
