//! Console rendering for sky events.
//!
//! Event lines are plain text; only the banner and headings are colored.

use chrono::DateTime;
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use skyevents_core::SkyError;
use skyevents_core::event::Event;
use skyevents_core::notify::DISPLAY_TIME_FORMAT;
use skyevents_core::satellite::{PassLookup, SkipReason};

/// Extension trait for TUI rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let start = self.start.format(DISPLAY_TIME_FORMAT);

        match &self.end {
            // Duration events (passes) show their span and brightness
            Some(end) => {
                let extra = self
                    .magnitude
                    .map(|m| format!(" (mag {})", m))
                    .unwrap_or_default();
                format!(
                    "- {} - {} -> {}{}",
                    self.name,
                    start,
                    end.format("%I:%M %p %Z"),
                    extra
                )
            }
            None => format!("- {}: {} - {}", self.kind, self.name, start),
        }
    }
}

pub fn banner(title: &str) -> String {
    format!("\n* {} *\n", title).bold().magenta().to_string()
}

pub fn heading(text: &str) -> String {
    text.cyan().to_string()
}

pub fn settings(lat: f64, lon: f64, alt: i32, days: i64, now: &DateTime<Tz>) -> String {
    [
        heading("Your settings:"),
        format!("- Latitude:     {}", lat),
        format!("- Longitude:    {}", lon),
        format!("- Altitude:     {} m", alt),
        format!("- Horizon:      {} days", days),
        format!("- Timezone:     {}", now.timezone().name()),
        format!("- Now:          {}", now.format(DISPLAY_TIME_FORMAT)),
    ]
    .join("\n")
}

pub fn fetch_error(year: i32, error: &SkyError) -> String {
    let reason = match error {
        SkyError::FeedStatus { status, .. } => format!("HTTP {}", status),
        SkyError::FeedUnreachable { reason, .. } => reason.clone(),
        other => other.to_string(),
    };
    format!("[Error fetching {} feed: {}]", year, reason)
        .red()
        .to_string()
}

pub fn no_passes(lookup: &PassLookup) -> String {
    match lookup {
        PassLookup::Skipped(SkipReason::MissingApiKey) => {
            "- None found or N2YO_API_KEY not set.".to_string()
        }
        PassLookup::Skipped(SkipReason::Failed(reason)) => {
            format!("- None found ({})", reason.dimmed())
        }
        PassLookup::Passes(_) => "- None found in range".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use skyevents_core::event::{EventKind, EventSource};

    fn eclipse() -> Event {
        Event {
            kind: EventKind::Eclipse,
            name: "Partial Solar Eclipse".to_string(),
            start: New_York.with_ymd_and_hms(2026, 8, 12, 0, 0, 0).unwrap(),
            end: None,
            magnitude: None,
            source: EventSource::AstronomyFeed,
        }
    }

    fn pass(magnitude: Option<f64>) -> Event {
        Event {
            kind: EventKind::SatellitePass,
            name: "ISS visible pass (max elev ~42°)".to_string(),
            start: New_York.with_ymd_and_hms(2026, 8, 12, 21, 3, 0).unwrap(),
            end: Some(New_York.with_ymd_and_hms(2026, 8, 12, 21, 9, 0).unwrap()),
            magnitude,
            source: EventSource::SatelliteApi,
        }
    }

    #[test]
    fn renders_astronomy_event() {
        assert_eq!(
            eclipse().render(),
            "- Eclipse: Partial Solar Eclipse - Wed Aug 12, 12:00 AM EDT"
        );
    }

    #[test]
    fn renders_pass_with_magnitude() {
        assert_eq!(
            pass(Some(-2.5)).render(),
            "- ISS visible pass (max elev ~42°) - Wed Aug 12, 09:03 PM EDT -> 09:09 PM EDT (mag -2.5)"
        );
    }

    #[test]
    fn renders_pass_without_magnitude() {
        assert!(pass(None).render().ends_with("-> 09:09 PM EDT"));
    }

    #[test]
    fn fetch_error_names_year_once() {
        let err = SkyError::FeedStatus {
            year: 2026,
            status: 503,
        };
        assert!(fetch_error(2026, &err).contains("[Error fetching 2026 feed: HTTP 503]"));
    }

    #[test]
    fn missing_key_message() {
        let lookup = PassLookup::Skipped(SkipReason::MissingApiKey);
        assert_eq!(no_passes(&lookup), "- None found or N2YO_API_KEY not set.");
    }

    #[test]
    fn settings_echo_lists_location() {
        let now = New_York.with_ymd_and_hms(2026, 10, 16, 9, 15, 0).unwrap();
        let text = settings(40.7128, -74.006, 50, 14, &now);

        assert!(text.contains("- Latitude:     40.7128"));
        assert!(text.contains("- Longitude:    -74.006"));
        assert!(text.contains("- Timezone:     America/New_York"));
        assert!(text.contains("- Now:          Fri Oct 16, 09:15 AM EDT"));
    }
}
