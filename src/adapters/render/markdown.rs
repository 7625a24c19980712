//! Markdown rendering surface. Implements RenderPort by writing report files.

use crate::domain::{ChannelHistory, DomainError, MemberReport, PmoReport, ReportTable};
use crate::ports::RenderPort;
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

const MISSING_SCOPE_NOTE: &str =
    "> ⚠️ Some Slack data could not be read: the bot token is missing a scope.\n\n";

/// Writes one Markdown file per view under `reports_dir`.
pub struct MarkdownRenderer {
    reports_dir: PathBuf,
}

impl MarkdownRenderer {
    pub fn new(reports_dir: impl AsRef<Path>) -> Self {
        Self {
            reports_dir: reports_dir.as_ref().to_path_buf(),
        }
    }

    async fn write(&self, filename: &str, md: String) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Render(format!("Failed to create reports dir: {}", e)))?;
        let path = self.reports_dir.join(filename);
        fs::write(&path, md)
            .await
            .map_err(|e| DomainError::Render(format!("Failed to write report: {}", e)))?;
        info!(path = %path.display(), "report rendered");
        Ok(path)
    }
}

/// `member_{user_id}.md`, with characters outside `[A-Za-z0-9_-]` replaced by
/// `_` so a typed id can't leave the reports directory.
pub fn member_filename(user_id: &str) -> String {
    let stem: String = user_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("member_{}.md", stem)
}

/// Make a value safe inside a Markdown table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', "<br>")
}

fn footer() -> String {
    format!(
        "---\n*Generated by standup-sync on {}*\n",
        Local::now().format("%Y-%m-%d %H:%M")
    )
}

pub fn table_markdown(table: &ReportTable, error: Option<&str>, warn_missing: bool) -> String {
    let mut md = String::new();
    md.push_str("# Standup Sheet\n\n");
    if let Some(err) = error {
        md.push_str(&format!("> ❌ {}\n\n", err));
    }
    if warn_missing {
        md.push_str(MISSING_SCOPE_NOTE);
    }
    if table.row_count() == 0 {
        md.push_str("*No messages.*\n\n");
        md.push_str(&footer());
        return md;
    }

    let header = table.header();
    md.push_str(&format!(
        "| {} |\n",
        header.iter().map(|h| cell(h)).collect::<Vec<_>>().join(" | ")
    ));
    md.push_str(&format!("|{}\n", " --- |".repeat(header.len())));
    for row in table.to_rows().iter().skip(1) {
        md.push_str(&format!(
            "| {} |\n",
            row.iter().map(|c| cell(c)).collect::<Vec<_>>().join(" | ")
        ));
    }
    md.push('\n');
    md.push_str(&footer());
    md
}

pub fn pmo_markdown(report: &PmoReport) -> String {
    let mut md = String::new();
    md.push_str("# PMO Report\n\n");
    if report.warn_missing {
        md.push_str(MISSING_SCOPE_NOTE);
    }
    md.push_str(&format!(
        "**Members:** {} | **Messages with blockers:** {}\n\n",
        report.members.len(),
        report.total_blockers
    ));

    if !report.members.is_empty() {
        md.push_str("| Member | Slack ID | Messages | Blocker |\n");
        md.push_str("| --- | --- | --- | --- |\n");
        for m in &report.members {
            let name = match &m.avatar_ref {
                Some(avatar) => format!("![]({}) {}", avatar, cell(&m.display_name)),
                None => cell(&m.display_name),
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                name,
                m.user_id,
                m.message_count,
                if m.has_blocker { "🚧" } else { "" }
            ));
        }
        md.push('\n');
    }

    md.push_str(&footer());
    md
}

pub fn member_markdown(report: &MemberReport) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", report.user_name));
    if let Some(avatar) = &report.avatar_ref {
        md.push_str(&format!("![avatar]({})\n\n", avatar));
    }
    if report.messages.is_empty() {
        md.push_str("*No messages from this member.*\n\n");
    }
    for m in &report.messages {
        md.push_str(&format!("## {} <a id=\"{}\"></a>\n\n", m.label, m.id));
        md.push_str("<details><summary>Raw text</summary>\n\n```\n");
        md.push_str(&m.raw_text);
        md.push_str("\n```\n\n</details>\n\n");
    }
    md.push_str(&footer());
    md
}

pub fn history_markdown(history: &ChannelHistory) -> String {
    let mut md = String::new();
    md.push_str(&format!("# #{}\n\n", history.channel_name));
    if let Some(err) = &history.error {
        md.push_str(&format!("> ❌ {}\n\n", err));
    }
    if history.warn_missing {
        md.push_str(MISSING_SCOPE_NOTE);
    }
    for m in &history.messages {
        md.push_str(&format!(
            "**{}** · {}\n\n",
            m.user_name,
            m.time.as_deref().unwrap_or("unknown time")
        ));
        for line in m.text.lines() {
            md.push_str(&format!("> {}\n", line));
        }
        md.push('\n');
    }
    md.push_str(&footer());
    md
}

#[async_trait::async_trait]
impl RenderPort for MarkdownRenderer {
    async fn render_table(
        &self,
        table: &ReportTable,
        error: Option<&str>,
        warn_missing: bool,
    ) -> Result<PathBuf, DomainError> {
        self.write("standup_sheet.md", table_markdown(table, error, warn_missing))
            .await
    }

    async fn render_pmo_report(&self, report: &PmoReport) -> Result<PathBuf, DomainError> {
        self.write("pmo_report.md", pmo_markdown(report)).await
    }

    async fn render_member_report(&self, report: &MemberReport) -> Result<PathBuf, DomainError> {
        self.write(&member_filename(&report.user_id), member_markdown(report))
            .await
    }

    async fn render_history(&self, history: &ChannelHistory) -> Result<PathBuf, DomainError> {
        self.write("channel_history.md", history_markdown(history))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EnrichedMessage, MemberMessage, UserSummary};

    #[test]
    fn test_table_markdown_escapes_cells() {
        let mut table = ReportTable::with_headers(["User", "Blocker"]);
        table.push_row(vec!["Ana".into(), "a | b\nc".into()]);
        let md = table_markdown(&table, None, true);
        assert!(md.contains("| User | Blocker |"));
        assert!(md.contains("| --- | --- |"));
        assert!(md.contains("| Ana | a \\| b<br>c |"));
        assert!(md.contains("missing a scope"));
    }

    #[test]
    fn test_empty_table_markdown() {
        let table = ReportTable::with_headers(["User"]);
        let md = table_markdown(&table, Some("Slack API error: not_in_channel"), false);
        assert!(md.contains("*No messages.*"));
        assert!(md.contains("not_in_channel"));
    }

    #[test]
    fn test_pmo_markdown() {
        let report = PmoReport {
            members: vec![UserSummary {
                user_id: "U1".into(),
                display_name: "Ana".into(),
                avatar_ref: None,
                message_count: 4,
                has_blocker: true,
            }],
            total_blockers: 2,
            warn_missing: false,
        };
        let md = pmo_markdown(&report);
        assert!(md.contains("**Messages with blockers:** 2"));
        assert!(md.contains("| Ana | U1 | 4 | 🚧 |"));
    }

    #[test]
    fn test_member_filename_is_sanitized() {
        assert_eq!(member_filename("U1"), "member_U1.md");
        assert_eq!(member_filename("../../etc/x"), "member_______etc_x.md");
        assert_eq!(member_filename("a b\\c"), "member_a_b_c.md");
    }

    #[tokio::test]
    async fn test_member_report_stays_in_reports_dir() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports");
        let renderer = MarkdownRenderer::new(&reports);
        let member = MemberReport {
            user_id: "../U1".into(),
            user_name: "Ana".into(),
            avatar_ref: None,
            messages: vec![],
        };
        let path = renderer.render_member_report(&member).await.unwrap();
        assert_eq!(path.parent(), Some(reports.as_path()));
        assert!(path.ends_with("member____U1.md"));
    }

    #[tokio::test]
    async fn test_render_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = MarkdownRenderer::new(dir.path().join("reports"));

        let member = MemberReport {
            user_id: "U1".into(),
            user_name: "Ana".into(),
            avatar_ref: None,
            messages: vec![MemberMessage {
                id: "msg-0".into(),
                label: "Today's Report".into(),
                raw_text: "Yesterday:\nx".into(),
            }],
        };
        let path = renderer.render_member_report(&member).await.unwrap();
        assert!(path.ends_with("member_U1.md"));
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("## Today's Report"));
        assert!(body.contains("Yesterday:\nx"));

        let history = ChannelHistory {
            channel_name: "standup".into(),
            messages: vec![EnrichedMessage {
                author_id: Some("U1".into()),
                user_name: "Ana".into(),
                avatar_ref: None,
                time: None,
                text: "hello\nworld".into(),
            }],
            error: None,
            warn_missing: false,
        };
        let path = renderer.render_history(&history).await.unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("# #standup"));
        assert!(body.contains("> hello\n> world\n"));
    }
}
