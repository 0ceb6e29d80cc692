//! Normalized sky event types.
//!
//! Both data sources (the astronomy calendar feed and the satellite pass API)
//! are converted into [`Event`] before anything downstream sees them. Every
//! `Event` carries its times in the canonical timezone, so events from the two
//! sources can be compared and sorted directly.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// What kind of sky event this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MeteorShower,
    Eclipse,
    SatellitePass,
    GenericEvent,
}

impl EventKind {
    /// Classify a calendar entry name by keyword.
    ///
    /// "meteor shower" wins over "eclipse" when both appear. Matching is
    /// case-insensitive.
    pub fn from_name(name: &str) -> Self {
        let lname = name.to_lowercase();
        if lname.contains("meteor shower") {
            EventKind::MeteorShower
        } else if lname.contains("eclipse") {
            EventKind::Eclipse
        } else {
            EventKind::GenericEvent
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::MeteorShower => "Meteor Shower",
            EventKind::Eclipse => "Eclipse",
            EventKind::SatellitePass => "ISS Pass",
            EventKind::GenericEvent => "Event",
        };
        f.write_str(label)
    }
}

/// Where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    AstronomyFeed,
    SatelliteApi,
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSource::AstronomyFeed => f.write_str("In-The-Sky iCal"),
            EventSource::SatelliteApi => f.write_str("N2YO"),
        }
    }
}

/// An upcoming sky event, normalized to the canonical timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub name: String,
    pub start: DateTime<Tz>,
    /// Only present for duration events (satellite passes)
    pub end: Option<DateTime<Tz>>,
    /// Brightness, satellite passes only
    pub magnitude: Option<f64>,
    pub source: EventSource,
}

/// A `DTSTART` value as it appears in the calendar feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedTime {
    /// All-day entry without a time of day
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
    /// Wall-clock time with no zone attached
    DateTimeFloating(NaiveDateTime),
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl FeedTime {
    /// Express this time as an instant in `tz`.
    ///
    /// Date-only values become local midnight of that date in `tz`. Floating
    /// values are read as wall-clock time in `tz`. A `TZID` that chrono-tz does
    /// not know is treated like a floating value.
    pub fn in_zone(&self, tz: Tz) -> DateTime<Tz> {
        match self {
            FeedTime::Date(d) => local_to_zone(tz, d.and_time(NaiveTime::MIN)),
            FeedTime::DateTimeUtc(dt) => dt.with_timezone(&tz),
            FeedTime::DateTimeFloating(naive) => local_to_zone(tz, *naive),
            FeedTime::DateTimeZoned { datetime, tzid } => match tzid.parse::<Tz>() {
                Ok(source_tz) => local_to_zone(source_tz, *datetime).with_timezone(&tz),
                Err(_) => local_to_zone(tz, *datetime),
            },
        }
    }
}

impl fmt::Display for FeedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedTime::Date(d) => write!(f, "{}", d),
            FeedTime::DateTimeUtc(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            FeedTime::DateTimeFloating(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            FeedTime::DateTimeZoned { datetime, tzid } => {
                write!(f, "{} ({})", datetime.format("%Y-%m-%d %H:%M"), tzid)
            }
        }
    }
}

/// Resolve a wall-clock time in `tz`, taking the earlier instant when the
/// clock repeats and reading the value as UTC when it falls in a DST gap.
fn local_to_zone(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// A calendar feed entry before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub name: String,
    pub start: Option<FeedTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    #[test]
    fn meteor_shower_wins_over_eclipse() {
        let kind = EventKind::from_name("Meteor shower during the lunar ECLIPSE");
        assert_eq!(kind, EventKind::MeteorShower);
    }

    #[test]
    fn classify_by_keyword() {
        assert_eq!(EventKind::from_name("Total Lunar Eclipse"), EventKind::Eclipse);
        assert_eq!(EventKind::from_name("Geminid Meteor Shower"), EventKind::MeteorShower);
        assert_eq!(EventKind::from_name("Full Moon"), EventKind::GenericEvent);
    }

    #[test]
    fn date_only_is_local_midnight() {
        let time = FeedTime::Date(NaiveDate::from_ymd_opt(2026, 8, 12).unwrap());
        let start = time.in_zone(New_York);

        assert_eq!(start.format("%Y-%m-%d %H:%M").to_string(), "2026-08-12 00:00");
        assert_eq!(start.naive_utc().format("%H:%M").to_string(), "04:00");
    }

    #[test]
    fn utc_time_is_converted() {
        let time = FeedTime::DateTimeUtc(Utc.with_ymd_and_hms(2026, 1, 3, 12, 0, 0).unwrap());
        let start = time.in_zone(New_York);

        assert_eq!(start.format("%H:%M %Z").to_string(), "07:00 EST");
    }

    #[test]
    fn zoned_time_is_converted() {
        let time = FeedTime::DateTimeZoned {
            datetime: NaiveDate::from_ymd_opt(2026, 3, 3)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            tzid: "Europe/London".to_string(),
        };

        assert_eq!(time.in_zone(New_York).format("%H:%M").to_string(), "07:00");
    }

    #[test]
    fn unknown_tzid_reads_as_canonical_wall_clock() {
        let naive = NaiveDate::from_ymd_opt(2026, 3, 3)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap();
        let time = FeedTime::DateTimeZoned {
            datetime: naive,
            tzid: "Mars/Olympus_Mons".to_string(),
        };

        assert_eq!(time.in_zone(New_York).naive_local(), naive);
    }

    #[test]
    fn dst_gap_does_not_panic() {
        // 02:30 does not exist in New York on 2026-03-08
        let naive = NaiveDate::from_ymd_opt(2026, 3, 8)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let start = FeedTime::DateTimeFloating(naive).in_zone(New_York);

        assert_eq!(start.naive_utc(), naive);
    }
}
