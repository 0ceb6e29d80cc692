//! Keyword filter and time window for astronomy feed entries.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use tracing::trace;

use crate::clock::Clock;
use crate::constants::KEYWORDS;
use crate::event::{Event, EventKind, EventSource, RawEntry};

/// Keep feed entries that mention a keyword and start within
/// `[now, now + horizon_days]`, tagged and sorted by start.
///
/// The clock is read once, so every entry in a call is judged against the same
/// window. Date-only entries start at local midnight in the clock's timezone.
pub fn classify(entries: &[RawEntry], horizon_days: i64, clock: &dyn Clock) -> Vec<Event> {
    let tz = clock.tz();
    let now = clock.now();
    let cutoff = horizon_end(now, horizon_days);

    let mut out: Vec<Event> = entries
        .iter()
        .filter_map(|entry| {
            let name = entry.name.trim();
            let lname = name.to_lowercase();
            if !KEYWORDS.iter().any(|k| lname.contains(k)) {
                return None;
            }

            let raw_start = entry.start.as_ref()?;
            let start = raw_start.in_zone(tz);
            if start < now || cutoff.is_some_and(|c| start > c) {
                trace!(name, start = %raw_start, "outside window");
                return None;
            }

            Some(Event {
                kind: EventKind::from_name(&lname),
                name: name.to_string(),
                start,
                end: None,
                magnitude: None,
                source: EventSource::AstronomyFeed,
            })
        })
        .collect();

    // sort_by_key is stable: equal starts keep feed order
    out.sort_by_key(|e| e.start);
    out
}

/// `now + horizon_days`, or `None` when that lies past the last instant
/// chrono can represent (the window is then open-ended).
pub fn horizon_end(now: DateTime<Tz>, horizon_days: i64) -> Option<DateTime<Tz>> {
    Duration::try_days(horizon_days).and_then(|d| now.checked_add_signed(d))
}
