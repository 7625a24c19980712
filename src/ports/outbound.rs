//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    ChannelHistory, DomainError, MemberReport, Message, PmoReport, Profile, ReportTable,
};
use std::path::PathBuf;

/// Chat provider. Fetch channel history and metadata.
#[async_trait::async_trait]
pub trait ChatSource: Send + Sync {
    /// Fetch the channel's messages, newest first as the provider returns them.
    async fn fetch_channel_history(&self, channel_id: &str) -> Result<Vec<Message>, DomainError>;

    /// Human-readable channel name.
    ///
    /// Returns `DomainError::MissingPermission` when the token lacks the scope.
    async fn fetch_channel_name(&self, channel_id: &str) -> Result<String, DomainError>;
}

/// Profile lookup for a single author.
#[async_trait::async_trait]
pub trait ProfilePort: Send + Sync {
    /// Returns `DomainError::MissingPermission` when the token lacks the scope;
    /// any other failure is a plain lookup error.
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, DomainError>;
}

/// Spreadsheet sink. Full overwrite starting at the top-left cell.
#[async_trait::async_trait]
pub trait SheetSink: Send + Sync {
    /// Write `rows` (header first) into `worksheet` of the sheet `sheet_key`.
    async fn write_table(
        &self,
        sheet_key: &str,
        worksheet: &str,
        rows: &[Vec<String>],
    ) -> Result<(), DomainError>;
}

/// Rendering surface. Each call returns where the view was written.
#[async_trait::async_trait]
pub trait RenderPort: Send + Sync {
    async fn render_table(
        &self,
        table: &ReportTable,
        error: Option<&str>,
        warn_missing: bool,
    ) -> Result<PathBuf, DomainError>;

    async fn render_pmo_report(&self, report: &PmoReport) -> Result<PathBuf, DomainError>;

    async fn render_member_report(&self, report: &MemberReport) -> Result<PathBuf, DomainError>;

    async fn render_history(&self, history: &ChannelHistory) -> Result<PathBuf, DomainError>;
}
