//! Field extraction from standup message bodies.
//!
//! Labels ("Yesterday:", "Today:", "Blockers:", "Status:") are free-text
//! markers, not a grammar. Every function here is best-effort and total:
//! a missing or malformed section yields an empty result or a sentinel.

use crate::domain::duration::format_hours;
use crate::domain::entities::{DurationToken, StandupReport, TimeUnit};
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder for "no blocker section".
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for "no time tokens in today's section".
pub const NO_TIME: &str = "0";

// -- Section bodies: label line, then everything up to the terminator line --
static RE_YESTERDAY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Yesterday:\*?[^\S\n]*\n").expect("valid yesterday label regex")
});
static RE_TODAY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Today:\*?[^\S\n]*\n").expect("valid today label regex"));
static RE_BLOCKERS_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Blockers:\*?[^\S\n]*\n").expect("valid blockers label regex")
});
// Terminators are anchored at a line start and may match right where the
// body begins, so an empty section stops at the very next label line.
static RE_YESTERDAY_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[^\S\n]*\*?(?:Today|Blockers):").expect("valid yesterday end regex")
});
static RE_TODAY_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[^\S\n]*\*?Blockers:").expect("valid today end regex")
});
static RE_BLOCKERS_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[^\S\n]*\*?Status:").expect("valid blockers end regex")
});

// -- Time scoping on the flattened (single-line) body --
static RE_YESTERDAY_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*?Yesterday:\*?").expect("valid yesterday split regex")
});
static RE_TODAY_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\*?Today:\*?").expect("valid today split regex"));
static RE_YESTERDAY_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*?(?:Today|Blockers|Status):").expect("valid yesterday stop regex")
});
static RE_TODAY_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*?(?:Yesterday|Blockers|Status):").expect("valid today stop regex")
});

/// Number, then an hour or minute unit. Tolerates a leading `|`, `(`, `-` or
/// space and a dash between number and unit ("2 - hrs").
static RE_TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\|\s*|\(\s*|[-\s])?([0-9]+(?:\.[0-9]+)?)\s*-?\s*(hrs?|minutes?|mins?)\b")
        .expect("valid time token regex")
});

/// Bodies that follow `label`, each ending right before the next `end` match.
/// With `until_end`, a body with no terminator runs to the end of the text;
/// otherwise it is discarded.
fn section_bodies<'a>(text: &'a str, label: &Regex, end: &Regex, until_end: bool) -> Vec<&'a str> {
    let mut bodies = Vec::new();
    let mut pos = 0;
    while let Some(m) = label.find_at(text, pos) {
        let start = m.end();
        match end.find_at(text, start) {
            Some(e) => {
                bodies.push(&text[start..e.start()]);
                pos = e.start();
            }
            None => {
                if until_end {
                    bodies.push(&text[start..]);
                }
                break;
            }
        }
    }
    bodies
}

fn trimmed_non_empty(bodies: Vec<&str>) -> Vec<String> {
    bodies
        .into_iter()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from)
        .collect()
}

/// Text under "Yesterday:" up to the next "Today:" or "Blockers:" line.
pub fn extract_yesterday_tasks(cell: &str) -> Vec<String> {
    trimmed_non_empty(section_bodies(
        cell,
        &RE_YESTERDAY_LABEL,
        &RE_YESTERDAY_END,
        false,
    ))
}

/// Text under "Today:" up to the next "Blockers:" line.
pub fn extract_today_tasks(cell: &str) -> Vec<String> {
    trimmed_non_empty(section_bodies(cell, &RE_TODAY_LABEL, &RE_TODAY_END, false))
}

/// Text under "Blockers:" up to a "Status:" line or the end of the message.
///
/// Never empty: returns `["N/A"]` when there is no section or every body is
/// blank.
pub fn extract_blocker_tasks(cell: &str) -> Vec<String> {
    let blockers = trimmed_non_empty(section_bodies(
        cell,
        &RE_BLOCKERS_LABEL,
        &RE_BLOCKERS_END,
        true,
    ));
    if blockers.is_empty() {
        vec![NOT_AVAILABLE.to_string()]
    } else {
        blockers
    }
}

/// True when at least one blocker entry is something other than "N/A".
pub fn has_blocker(blockers: &[String]) -> bool {
    blockers
        .iter()
        .any(|b| b.trim().to_uppercase() != NOT_AVAILABLE)
}

/// Time tokens that appear after `split` labels, each segment cut at the
/// first `stop` label. Line breaks are flattened first so a token split
/// across lines is still seen.
fn scoped_time_tokens(text: &str, split: &Regex, stop: &Regex) -> Vec<DurationToken> {
    let flat = text.replace(['\n', '\r'], " ");
    let mut tokens = Vec::new();
    for segment in split.split(flat.trim()).skip(1) {
        let segment = stop.split(segment).next().unwrap_or_default();
        tokens.extend(RE_TIME_TOKEN.captures_iter(segment).filter_map(|c| {
            let magnitude = c.get(1)?.as_str().to_string();
            let unit = if c.get(2)?.as_str().to_ascii_lowercase().starts_with('h') {
                TimeUnit::Hours
            } else {
                TimeUnit::Minutes
            };
            Some(DurationToken { magnitude, unit })
        }));
    }
    tokens
}

/// Duration tokens written in the "Yesterday:" section.
pub fn yesterday_time_tokens(text: &str) -> Vec<DurationToken> {
    scoped_time_tokens(text, &RE_YESTERDAY_SPLIT, &RE_YESTERDAY_STOP)
}

/// Duration tokens written in the "Today:" section.
pub fn today_time_tokens(text: &str) -> Vec<DurationToken> {
    scoped_time_tokens(text, &RE_TODAY_SPLIT, &RE_TODAY_STOP)
}

/// Yesterday's time tokens as `"{number}{hr|min}"` strings. Empty when none.
pub fn extract_yesterday_time_spent(text: &str) -> Vec<String> {
    yesterday_time_tokens(text)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Today's time tokens concatenated into one string, or `"0"` when none.
pub fn extract_today_time_spent(text: &str) -> String {
    let tokens = today_time_tokens(text);
    if tokens.is_empty() {
        return NO_TIME.to_string();
    }
    tokens.iter().map(ToString::to_string).collect()
}

fn total_time(tokens: &[DurationToken]) -> String {
    format_hours(tokens.iter().map(DurationToken::hours).sum())
}

/// Formatted total of yesterday's time tokens ("3hrs", "1hrs 30mins").
pub fn yesterday_total_time(text: &str) -> String {
    total_time(&yesterday_time_tokens(text))
}

/// Formatted total of today's time tokens.
pub fn today_total_time(text: &str) -> String {
    total_time(&today_time_tokens(text))
}

/// Run every extractor over one message body.
pub fn extract_report(text: &str) -> StandupReport {
    StandupReport {
        yesterday_tasks: extract_yesterday_tasks(text),
        yesterday_time: extract_yesterday_time_spent(text),
        today_tasks: extract_today_tasks(text),
        today_time: extract_today_time_spent(text),
        blockers: extract_blocker_tasks(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "Yesterday:\nFixed bug - 2hrs\nToday:\nWrite tests - 1hr\nBlockers:\nNone";

    #[test]
    fn test_extract_full_message() {
        let report = extract_report(SAMPLE);
        assert_eq!(report.yesterday_tasks, vec!["Fixed bug - 2hrs"]);
        assert_eq!(report.today_tasks, vec!["Write tests - 1hr"]);
        assert_eq!(report.blockers, vec!["None"]);
        assert!(has_blocker(&report.blockers));
        assert_eq!(report.yesterday_time, vec!["2hr"]);
        assert_eq!(report.today_time, "1hr");
    }

    #[test]
    fn test_missing_labels() {
        let text = "just saying hi, 2 hrs of meetings";
        assert!(extract_yesterday_tasks(text).is_empty());
        assert!(extract_today_tasks(text).is_empty());
        assert_eq!(extract_blocker_tasks(text), vec!["N/A"]);
        assert!(extract_yesterday_time_spent(text).is_empty());
        assert_eq!(extract_today_time_spent(text), "0");
        assert!(!has_blocker(&extract_blocker_tasks(text)));
    }

    #[test]
    fn test_empty_input() {
        let report = extract_report("");
        assert!(report.yesterday_tasks.is_empty());
        assert!(report.today_tasks.is_empty());
        assert_eq!(report.blockers, vec!["N/A"]);
        assert_eq!(report.today_time, "0");
    }

    #[test]
    fn test_blockers_whitespace_body_is_not_available() {
        assert_eq!(extract_blocker_tasks("Blockers:\n \nStatus: ok"), vec!["N/A"]);
    }

    #[test]
    fn test_blockers_stop_at_status() {
        let text = "Blockers:\nWaiting on API keys\nStatus: on track";
        assert_eq!(extract_blocker_tasks(text), vec!["Waiting on API keys"]);
    }

    #[test]
    fn test_emphasis_markers_and_case() {
        let text = "*Yesterday:*\n• Deployed service\n*today:*\n• Monitoring\n*BLOCKERS:*\nn/a";
        assert_eq!(extract_yesterday_tasks(text), vec!["• Deployed service"]);
        assert_eq!(extract_today_tasks(text), vec!["• Monitoring"]);
        let blockers = extract_blocker_tasks(text);
        assert_eq!(blockers, vec!["n/a"]);
        assert!(!has_blocker(&blockers));
    }

    #[test]
    fn test_multiline_section_is_one_entry() {
        let text = "Yesterday:\n- task a 1hr\n- task b 30 mins\n\nToday:\n- task c\nBlockers:\n";
        assert_eq!(
            extract_yesterday_tasks(text),
            vec!["- task a 1hr\n- task b 30 mins"]
        );
        assert_eq!(extract_today_tasks(text), vec!["- task c"]);
        assert_eq!(extract_blocker_tasks(text), vec!["N/A"]);
    }

    #[test]
    fn test_blocker_label_directly_followed_by_status() {
        let blockers = extract_blocker_tasks("Blockers:\nStatus: on track");
        assert_eq!(blockers, vec!["N/A"]);
        assert!(!has_blocker(&blockers));
    }

    #[test]
    fn test_empty_yesterday_stops_at_today_line() {
        let text = "Yesterday:\nToday:\nWrite tests\nBlockers:\nNone";
        assert!(extract_yesterday_tasks(text).is_empty());
        assert_eq!(extract_today_tasks(text), vec!["Write tests"]);
        assert_eq!(extract_blocker_tasks(text), vec!["None"]);
    }

    #[test]
    fn test_empty_today_stops_at_blockers_line() {
        let text = "Yesterday:\nx\nToday:\nBlockers:\nWaiting on review";
        assert_eq!(extract_yesterday_tasks(text), vec!["x"]);
        assert!(extract_today_tasks(text).is_empty());
        assert_eq!(extract_blocker_tasks(text), vec!["Waiting on review"]);
    }

    #[test]
    fn test_indented_terminator_label() {
        let text = "Blockers:\nneed access\n  *Status:* green";
        assert_eq!(extract_blocker_tasks(text), vec!["need access"]);
    }

    #[test]
    fn test_yesterday_without_terminator_is_empty() {
        assert!(extract_yesterday_tasks("Yesterday:\nsomething").is_empty());
        assert!(extract_today_tasks("Today:\nsomething").is_empty());
    }

    #[test]
    fn test_empty_yesterday_body_is_dropped() {
        assert!(extract_yesterday_tasks("Yesterday:\n\nToday:\nx\nBlockers:\ny").is_empty());
    }

    #[test]
    fn test_time_tokens_are_scoped_to_section() {
        let text = "Yesterday:\nbug (2 hrs) | 30 mins\nToday:\nreview - 1.5hr\nplanning 45 minutes\nBlockers:\nnone 3hrs";
        assert_eq!(extract_yesterday_time_spent(text), vec!["2hr", "30min"]);
        assert_eq!(extract_today_time_spent(text), "1.5hr45min");
    }

    #[test]
    fn test_today_unit_normalization_ignores_case() {
        assert_eq!(extract_today_time_spent("Today:\nx 2 HRS\ny 10 Mins"), "2hr10min");
    }

    #[test]
    fn test_totals() {
        let text = "Yesterday:\na 1hr\nb 30 mins\nToday:\nc 2hrs\nd 15min\nBlockers:\nN/A";
        assert_eq!(yesterday_total_time(text), "1hrs 30mins");
        assert_eq!(today_total_time(text), "2hrs");
        assert_eq!(today_total_time("no sections"), "0hrs");
        assert_eq!(today_total_time("Today:\nx 1.5hrs\ny 30 mins\nBlockers:\n"), "2hrs");
    }
}
