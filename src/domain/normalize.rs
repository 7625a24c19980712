//! Cell normalization for exported standup fields.
//!
//! All functions are total and idempotent. Pipeline order for time cells is
//! fixed: `standardize_time` -> `clean_time_column` -> `clean_double_ss`,
//! since each step can produce the doubled-letter patterns the next one
//! repairs.

use regex::Regex;
use std::sync::LazyLock;

/// UTF-8 bullet that went through a Latin-1 round trip.
const MOJIBAKE_BULLET: &str = "â¢";
const BULLET: &str = "•";

static RE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("valid newline run regex"));
static RE_BROKEN_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s?h\s?rs?").expect("valid broken hours regex"));
static RE_SPLIT_HR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bh[ \n]r\b").expect("valid split hr regex"));
static RE_HOUR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:hrs|hr|h)").expect("valid hour suffix regex"));
static RE_GLUED_HRS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(\S)hrs$").expect("valid glued hrs regex"));
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static RE_HRS_TYPO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hrs*").expect("valid hrs typo regex"));
static RE_DOUBLE_S: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"s{2,}").expect("valid double s regex"));

/// Repair encoding and spacing damage in task text.
pub fn clean_text(text: &str) -> String {
    let text = text.replace(MOJIBAKE_BULLET, BULLET);
    let text = RE_NEWLINES.replace_all(&text, "\n");
    let text = RE_BROKEN_HOURS.replace_all(&text, "${1} hrs");
    let text = RE_SPLIT_HR.replace_all(&text, "hr");
    text.trim().to_string()
}

/// Render every `<N>h`, `<N>hr`, `<N>hrs` as `"N hrs"`.
pub fn standardize_time(text: &str) -> String {
    let text = RE_HOUR_SUFFIX.replace_all(text, "${1} hrs");
    let text = text.replace(" hrs hrs", " hrs");
    let text = RE_GLUED_HRS.replace_all(&text, "${1} hrs");
    text.trim().to_string()
}

/// Flatten a time field into one spreadsheet cell: whitespace removed,
/// `hrss` typos collapsed, one entry per line joined with `", "`.
pub fn clean_time_column(value: &str) -> String {
    value
        .split(['\n', ','])
        .map(|entry| RE_WHITESPACE.replace_all(entry, ""))
        .map(|entry| RE_HRS_TYPO.replace_all(&entry, "hrs").into_owned())
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collapse runs of `s` ("hrss" -> "hrs").
pub fn clean_double_ss(text: &str) -> String {
    RE_DOUBLE_S.replace_all(text, "s").into_owned()
}

/// Task and blocker cells.
pub fn normalize_text_cell(raw: &str) -> String {
    clean_text(raw)
}

/// Per-entry time cells ("Yesterday task time", "Today task time").
pub fn normalize_time_cell(raw: &str) -> String {
    clean_double_ss(&clean_time_column(&standardize_time(raw)))
}

/// Total cells ("Yesterday Total Time (hrs)").
pub fn normalize_total_cell(raw: &str) -> String {
    clean_double_ss(&standardize_time(raw))
}
