//! Domain entities. Pure data structures for the core business.
//!
//! No Slack or Sheets types here; adapters map into these.

use serde::{Deserialize, Serialize};

/// A single message from the standup channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Slack user id. Bot and system messages have none.
    pub author_id: Option<String>,
    /// Unix seconds.
    pub timestamp: Option<i64>,
    pub raw_text: String,
}

impl Message {
    pub fn new(author_id: impl Into<String>, timestamp: i64, raw_text: impl Into<String>) -> Self {
        Self {
            author_id: Some(author_id.into()),
            timestamp: Some(timestamp),
            raw_text: raw_text.into(),
        }
    }
}

/// Structured fields recovered from one message body.
///
/// Recomputed on every extraction; never cached.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StandupReport {
    pub yesterday_tasks: Vec<String>,
    pub yesterday_time: Vec<String>,
    pub today_tasks: Vec<String>,
    /// Concatenated tokens, or `"0"` when none were found.
    pub today_time: String,
    /// Never empty: `["N/A"]` when the message has no blocker section.
    pub blockers: Vec<String>,
}

/// Unit of a [`DurationToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hours,
    Minutes,
}

impl TimeUnit {
    /// Short suffix used when tokens are re-serialized ("hr" / "min").
    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Hours => "hr",
            TimeUnit::Minutes => "min",
        }
    }
}

/// A (magnitude, unit) pair found in free text. The magnitude keeps its
/// original spelling so exported cells show what the author typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationToken {
    pub magnitude: String,
    pub unit: TimeUnit,
}

impl DurationToken {
    /// Hour-denominated value. Unparsable magnitudes count as zero.
    pub fn hours(&self) -> f64 {
        let value = self.magnitude.parse::<f64>().unwrap_or(0.0);
        match self.unit {
            TimeUnit::Hours => value,
            TimeUnit::Minutes => value / 60.0,
        }
    }
}

impl std::fmt::Display for DurationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}

/// Profile data returned by the chat provider. Both fields are optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: Option<String>,
    pub avatar_ref: Option<String>,
}

/// Per-user aggregate for the PMO report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    pub display_name: String,
    pub avatar_ref: Option<String>,
    pub message_count: usize,
    pub has_blocker: bool,
}

/// A named column of normalized cell values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

/// Ordered list of named columns; all columns have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReportTable {
    pub columns: Vec<Column>,
}

impl ReportTable {
    /// Build an empty table with the given column names.
    pub fn with_headers<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names
                .into_iter()
                .map(|n| Column {
                    name: n.into(),
                    values: Vec::new(),
                })
                .collect(),
        }
    }

    /// Append one row. Missing trailing cells are filled with empty strings,
    /// extra cells are dropped.
    pub fn push_row(&mut self, row: Vec<String>) {
        let mut cells = row.into_iter();
        for col in &mut self.columns {
            col.values.push(cells.next().unwrap_or_default());
        }
    }

    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// Header row followed by data rows, as written to a spreadsheet.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.row_count() + 1);
        rows.push(self.header());
        for i in 0..self.row_count() {
            rows.push(
                self.columns
                    .iter()
                    .map(|c| c.values.get(i).cloned().unwrap_or_default())
                    .collect(),
            );
        }
        rows
    }
}

/// PMO overview: per-user counts and the number of messages with a blocker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PmoReport {
    pub members: Vec<UserSummary>,
    pub total_blockers: usize,
    pub warn_missing: bool,
}

/// One message in a member's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberMessage {
    /// `msg-{index}` where index is the position in the channel history.
    pub id: String,
    /// "Today's Report", "Yesterday's Report", a `%Y-%m-%d` date or "Unknown Date".
    pub label: String,
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberReport {
    pub user_id: String,
    pub user_name: String,
    pub avatar_ref: Option<String>,
    pub messages: Vec<MemberMessage>,
}

/// Channel message enriched with the author's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedMessage {
    pub author_id: Option<String>,
    pub user_name: String,
    pub avatar_ref: Option<String>,
    /// Local `%Y-%m-%d %H:%M:%S`, if the message had a timestamp.
    pub time: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChannelHistory {
    pub channel_name: String,
    pub messages: Vec<EnrichedMessage>,
    pub error: Option<String>,
    pub warn_missing: bool,
}

/// Outcome of a sheet export.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExportSummary {
    pub table: ReportTable,
    pub error: Option<String>,
    pub warn_missing: bool,
}
