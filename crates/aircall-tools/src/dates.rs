//! Date parsing for tool arguments and natural-language questions
//!
//! Naive dates and times are interpreted in the server's local time zone.

use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone,
};
use once_cell::sync::Lazy;
use regex::Regex;

static PAST_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:past|last)\s+(\d+)\s+days?").expect("valid regex"));

static PAST_HOURS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:past|last)\s+(\d+)\s+hours?").expect("valid regex"));

/// Date references recognised inside questions, most specific first.
///
/// `None` means the matched text itself is handed to [`parse_natural_date`].
static QUERY_DATE_PATTERNS: Lazy<Vec<(Regex, Option<&'static str>)>> = Lazy::new(|| {
    [
        (r"(?i)\btoday'?s?\b", Some("today")),
        (r"(?i)\byesterday'?s?\b", Some("yesterday")),
        (r"(?i)\bthis week'?s?\b", Some("this week")),
        (r"(?i)\blast week'?s?\b", Some("last week")),
        (r"(?i)\bthis month'?s?\b", Some("this month")),
        (r"(?i)\blast month'?s?\b", Some("last month")),
        (r"(?i)\b(?:past|last)\s+\d+\s+days?\b", None),
        (r"(?i)\b(?:past|last)\s+\d+\s+hours?\b", None),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), replacement))
    .collect()
});

static TRAILING_CONNECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(from|on|in|during)\s*$").expect("valid regex"));

static LEADING_CONNECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(from|on|in|during)\s+").expect("valid regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// An inclusive time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
}

impl DateRange {
    /// Unix timestamp of the lower bound
    pub fn from_timestamp(&self) -> i64 {
        self.from.timestamp()
    }

    /// Unix timestamp of the upper bound
    pub fn to_timestamp(&self) -> i64 {
        self.to.timestamp()
    }

    /// Human description such as `on 2024-01-15` or `from 2024-01-08 to 2024-01-14`
    pub fn describe(&self) -> String {
        let from = self.from.format("%Y-%m-%d").to_string();
        let to = self.to.format("%Y-%m-%d").to_string();
        if self.from.date_naive() == self.to.date_naive() {
            format!("on {}", from)
        } else {
            format!("from {} to {}", from, to)
        }
    }
}

fn invalid_date(value: &str) -> String {
    format!(
        "Invalid date format: {}. Use ISO format (2024-01-15) or Unix timestamp.",
        value
    )
}

/// Parse a `from_date`/`to_date` argument into a Unix timestamp.
///
/// Accepts an all-digit Unix timestamp or an ISO 8601 date or datetime.
pub fn parse_date_param(value: &str) -> Result<i64, String> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return value.parse::<i64>().map_err(|_| invalid_date(value));
    }

    parse_iso(value)
        .map(|dt| dt.timestamp())
        .ok_or_else(|| invalid_date(value))
}

fn local(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

fn start_of(date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    local(date.and_time(NaiveTime::MIN))
}

fn end_of(date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    local(date.and_hms_opt(23, 59, 59)?)
}

/// Parse an ISO 8601 date or datetime; values without an offset are local time
pub fn parse_iso(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.replace('Z', "+00:00");

    const WITH_OFFSET: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%dT%H:%M%:z",
        "%Y-%m-%d %H:%M%:z",
    ];
    for format in WITH_OFFSET {
        if let Ok(dt) = DateTime::parse_from_str(&text, format) {
            return Some(dt);
        }
    }

    const NAIVE: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&text, format) {
            return local(naive);
        }
    }

    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .ok()
        .and_then(start_of)
}

/// Resolve a date phrase relative to `now`.
///
/// Understands `today`, `yesterday`, `this/last week` (weeks start Monday),
/// `this/last month`, `past/last N days` (from the start of the day N days
/// ago), `past/last N hours` and ISO dates. Ranges run from the start of the
/// first day to the end of the last.
pub fn parse_natural_date(text: &str, now: DateTime<Local>) -> Option<DateRange> {
    let text = text.trim().to_lowercase();
    let today = now.date_naive();
    let now = now.fixed_offset();

    let range = |from, to| Some(DateRange { from, to });

    match text.as_str() {
        "today" | "today's" => return range(start_of(today)?, end_of(today)?),
        "yesterday" => {
            let yesterday = today.pred_opt()?;
            return range(start_of(yesterday)?, end_of(yesterday)?);
        }
        "this week" | "this week's" => {
            let week_start = today - Days::new(today.weekday().num_days_from_monday().into());
            return range(start_of(week_start)?, end_of(today)?);
        }
        "last week" | "last week's" => {
            let this_week = today - Days::new(today.weekday().num_days_from_monday().into());
            let this_week_start = start_of(this_week)?;
            return range(
                start_of(this_week - Days::new(7))?,
                this_week_start - Duration::seconds(1),
            );
        }
        "this month" | "this month's" => {
            return range(start_of(today.with_day(1)?)?, end_of(today)?);
        }
        "last month" | "last month's" => {
            let last_month_end = start_of(today.with_day(1)?)? - Duration::seconds(1);
            let last_month_start = start_of(last_month_end.date_naive().with_day(1)?)?;
            return range(last_month_start, last_month_end);
        }
        _ => {}
    }

    if let Some(caps) = PAST_DAYS.captures(&text) {
        let days: u64 = caps[1].parse().ok()?;
        let first = today.checked_sub_days(Days::new(days))?;
        return range(start_of(first)?, end_of(today)?);
    }

    if let Some(caps) = PAST_HOURS.captures(&text) {
        let hours: i64 = caps[1].parse().ok()?;
        let from = now.checked_sub_signed(Duration::try_hours(hours)?)?;
        return range(from, now);
    }

    let parsed = parse_iso(&text)?;
    let end = parsed
        .offset()
        .from_local_datetime(&parsed.date_naive().and_hms_opt(23, 59, 59)?)
        .single()?;
    range(parsed, end)
}

/// Pull the first recognised date reference out of a question.
///
/// Returns the question with the reference (and a dangling connector such as
/// "from" or "on") removed, plus the resolved range.
pub fn extract_date_from_query(query: &str, now: DateTime<Local>) -> (String, Option<DateRange>) {
    for (pattern, replacement) in QUERY_DATE_PATTERNS.iter() {
        let Some(found) = pattern.find(query) else {
            continue;
        };

        let phrase = match replacement {
            Some(phrase) => phrase.to_string(),
            None => found.as_str().to_lowercase(),
        };

        if let Some(range) = parse_natural_date(&phrase, now) {
            let cleaned = pattern.replace_all(query, "");
            let cleaned = TRAILING_CONNECTOR.replace(cleaned.trim(), "");
            let cleaned = LEADING_CONNECTOR.replace(&cleaned, "");
            let cleaned = WHITESPACE.replace_all(&cleaned, " ").trim().to_string();
            return (cleaned, Some(range));
        }
    }

    (query.to_string(), None)
}
