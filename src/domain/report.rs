//! Report aggregation: per-user summaries, blocker counts and the standup
//! sheet rows. Pure functions over already-fetched messages.

use crate::domain::entities::{Message, Profile, UserSummary};
use crate::domain::extract::{
    extract_blocker_tasks, extract_today_tasks, extract_today_time_spent,
    extract_yesterday_tasks, extract_yesterday_time_spent, has_blocker, today_total_time,
    yesterday_total_time,
};
use crate::domain::normalize::{normalize_text_cell, normalize_time_cell, normalize_total_cell};
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::collections::HashMap;

/// Header of the exported standup sheet.
pub const STANDUP_COLUMNS: [&str; 9] = [
    "Time",
    "User",
    "Yesterday's tasks",
    "Today's tasks",
    "Blocker",
    "Yesterday task time",
    "Today task time",
    "Yesterday Total Time (hrs)",
    "Today Total Time (hrs)",
];

pub const TODAY_LABEL: &str = "Today's Report";
pub const YESTERDAY_LABEL: &str = "Yesterday's Report";
pub const UNKNOWN_DATE_LABEL: &str = "Unknown Date";

/// Display name used when a profile has no name or could not be fetched.
pub fn fallback_name(user_id: &str) -> String {
    format!("<@{}>", user_id)
}

/// Whether a message body reports a real blocker.
pub fn message_has_blocker(message: &Message) -> bool {
    has_blocker(&extract_blocker_tasks(&message.raw_text))
}

/// Author ids in first-seen order, each once. Authorless messages are skipped.
pub fn distinct_authors(messages: &[Message]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    messages
        .iter()
        .filter_map(|m| m.author_id.as_deref())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Fold messages into one summary per author.
///
/// `profiles` supplies names and avatars; authors missing from it get the
/// fallback name. Result is sorted by message count, descending; ties keep
/// first-seen order.
pub fn aggregate(messages: &[Message], profiles: &HashMap<String, Profile>) -> Vec<UserSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<UserSummary> = Vec::new();

    for message in messages {
        let Some(user_id) = message.author_id.as_deref() else {
            continue;
        };
        let slot = *index.entry(user_id).or_insert_with(|| {
            let profile = profiles.get(user_id).cloned().unwrap_or_default();
            summaries.push(UserSummary {
                user_id: user_id.to_string(),
                display_name: profile
                    .display_name
                    .unwrap_or_else(|| fallback_name(user_id)),
                avatar_ref: profile.avatar_ref,
                message_count: 0,
                has_blocker: false,
            });
            summaries.len() - 1
        });
        let summary = &mut summaries[slot];
        summary.message_count += 1;
        summary.has_blocker |= message_has_blocker(message);
    }

    summaries.sort_by(|a, b| b.message_count.cmp(&a.message_count));
    summaries
}

/// Number of authored messages whose blocker section is not "N/A".
pub fn summarize_blockers(messages: &[Message]) -> usize {
    messages
        .iter()
        .filter(|m| m.author_id.is_some())
        .filter(|m| message_has_blocker(m))
        .count()
}

/// One normalized sheet row, in [`STANDUP_COLUMNS`] order.
pub fn standup_row(time: Option<&str>, user_name: &str, text: &str) -> Vec<String> {
    vec![
        time.unwrap_or_default().to_string(),
        user_name.to_string(),
        normalize_text_cell(&extract_yesterday_tasks(text).join("\n")),
        normalize_text_cell(&extract_today_tasks(text).join("\n")),
        normalize_text_cell(&extract_blocker_tasks(text).join("\n")),
        normalize_time_cell(&extract_yesterday_time_spent(text).join("\n")),
        normalize_time_cell(&extract_today_time_spent(text)),
        normalize_total_cell(&yesterday_total_time(text)),
        normalize_total_cell(&today_total_time(text)),
    ]
}

fn local_datetime(timestamp: i64) -> Option<DateTime<Local>> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|dt| dt.with_timezone(&Local))
}

/// Local calendar date of a unix timestamp.
pub fn local_date(timestamp: i64) -> Option<NaiveDate> {
    local_datetime(timestamp).map(|dt| dt.date_naive())
}

/// Local `%Y-%m-%d %H:%M:%S` rendering of a unix timestamp.
pub fn format_local_time(timestamp: i64) -> Option<String> {
    local_datetime(timestamp).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Label a message date relative to `today`.
pub fn report_label(date: Option<NaiveDate>, today: NaiveDate) -> String {
    match date {
        Some(d) if d == today => TODAY_LABEL.to_string(),
        Some(d) if today.pred_opt() == Some(d) => YESTERDAY_LABEL.to_string(),
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => UNKNOWN_DATE_LABEL.to_string(),
    }
}
