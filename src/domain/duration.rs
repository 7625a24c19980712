//! Duration parsing. Turns free-text time notes ("2hrs", "30 mins", "1.5 hr")
//! into hour values and formats block totals for the sheet.

use regex::Regex;
use std::sync::LazyLock;

static RE_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*hrs?").expect("valid hours regex"));
static RE_MINUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:mins?|minutes?)").expect("valid minutes regex")
});

const HALF_HOUR_TOLERANCE: f64 = 1e-6;

fn is_half_hour(total: f64) -> bool {
    (total.fract() - 0.5).abs() < HALF_HOUR_TOLERANCE
}

/// Parse one line of time notes into hours.
///
/// Hour and minute tokens are summed independently; minutes count as
/// `minutes / 60`. When the line has whole-hour tokens only (no decimal
/// point) and a minute remainder, the total is rounded up to the next whole
/// hour, unless the remainder lands exactly on a half hour. Lines with a
/// decimal hour token are trusted as written. Lines with no hour token yield
/// the minute fraction unrounded. Unparsable input yields `0.0`.
pub fn parse_duration_line(text: &str) -> f64 {
    let line = text.trim();
    if line.is_empty() {
        return 0.0;
    }

    let hour_tokens: Vec<&str> = RE_HOURS
        .captures_iter(line)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    let minutes: f64 = RE_MINUTES
        .captures_iter(line)
        .filter_map(|c| c.get(1))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .sum();
    let minutes_as_hours = minutes / 60.0;

    if hour_tokens.is_empty() {
        return minutes_as_hours;
    }

    let has_decimal = hour_tokens.iter().any(|t| t.contains('.'));
    let hours: f64 = hour_tokens
        .iter()
        .filter_map(|t| t.parse::<f64>().ok())
        .sum();
    let total = hours + minutes_as_hours;

    if !has_decimal && minutes > 0.0 && !is_half_hour(total) {
        total.ceil()
    } else {
        total
    }
}

/// Sum a multi-line block of time notes and format the total.
///
/// A total ending in exactly half an hour renders as `"{whole}hrs 30mins"`,
/// anything else as `"{rounded}hrs"`.
pub fn sum_duration_block(text: &str) -> String {
    let total: f64 = text.lines().map(parse_duration_line).sum();
    format_hours(total)
}

/// Format an hour total the way the sheet expects it.
pub fn format_hours(total: f64) -> String {
    let whole = total.trunc();
    if is_half_hour(total) && total != whole {
        format!("{}hrs 30mins", whole as i64)
    } else {
        format!("{}hrs", total.round() as i64)
    }
}
