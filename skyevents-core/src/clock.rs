//! "Now" in the canonical timezone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::{SkyError, SkyResult};

/// Supplies the current instant in one fixed timezone.
pub trait Clock {
    fn tz(&self) -> Tz;
    fn now(&self) -> DateTime<Tz>;
}

/// Wall clock in a configured timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        SystemClock { tz }
    }
}

impl Clock for SystemClock {
    fn tz(&self) -> Tz {
        self.tz
    }

    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// A clock that never moves. Used for reproducible windows in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Tz>,
}

impl FixedClock {
    pub fn new(now: DateTime<Tz>) -> Self {
        FixedClock { now }
    }
}

impl Clock for FixedClock {
    fn tz(&self) -> Tz {
        self.now.timezone()
    }

    fn now(&self) -> DateTime<Tz> {
        self.now
    }
}

/// Resolve a timezone setting: an IANA name, or `"local"` for the system zone.
pub fn resolve_timezone(name: &str) -> SkyResult<Tz> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("local") {
        let system = iana_time_zone::get_timezone()
            .map_err(|e| SkyError::Config(format!("Could not detect system timezone: {e}")))?;
        return system
            .parse::<Tz>()
            .map_err(|_| SkyError::UnknownTimezone(system));
    }

    name.parse::<Tz>()
        .map_err(|_| SkyError::UnknownTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn resolves_iana_names() {
        assert_eq!(resolve_timezone("Europe/Berlin").unwrap(), chrono_tz::Europe::Berlin);
        assert_eq!(resolve_timezone(" America/New_York ").unwrap(), chrono_tz::America::New_York);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = resolve_timezone("Atlantis/Capital").unwrap_err();
        assert!(matches!(err, SkyError::UnknownTimezone(name) if name == "Atlantis/Capital"));
    }

    #[test]
    fn fixed_clock_reports_its_zone() {
        let now = chrono_tz::Asia::Tokyo.with_ymd_and_hms(2026, 5, 1, 21, 0, 0).unwrap();
        let clock = FixedClock::new(now);

        assert_eq!(clock.tz(), chrono_tz::Asia::Tokyo);
        assert_eq!(clock.now(), now);
    }
}
