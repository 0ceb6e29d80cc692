//! Feed parsing using the icalendar crate's parser.

use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{SkyError, SkyResult};
use crate::event::{FeedTime, RawEntry};

/// Parse a calendar document into raw (name, start) entries, one per VEVENT.
///
/// Only structure is checked here. Entries without a usable DTSTART are kept
/// with `start: None` so the classifier decides what to drop.
pub fn parse_feed(content: &str) -> SkyResult<Vec<RawEntry>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(SkyError::IcsParse)?;

    Ok(calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(to_raw_entry)
        .collect())
}

fn to_raw_entry(vevent: &Component<'_>) -> RawEntry {
    let name = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape_text(p.val.as_ref()))
        .unwrap_or_default();

    let start = vevent
        .find_prop("DTSTART")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(to_feed_time);

    RawEntry { name, start }
}

/// Convert icalendar's DatePerhapsTime to our FeedTime, preserving timezone info
fn to_feed_time(dpt: DatePerhapsTime) -> FeedTime {
    match dpt {
        DatePerhapsTime::Date(d) => FeedTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => FeedTime::DateTimeUtc(dt),
            CalendarDateTime::Floating(naive) => FeedTime::DateTimeFloating(naive),
            CalendarDateTime::WithTimezone { date_time, tzid } => FeedTime::DateTimeZoned {
                datetime: date_time,
                tzid,
            },
        },
    }
}

/// Undo RFC 5545 TEXT escaping (`\,` `\;` `\\` `\n`).
fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
