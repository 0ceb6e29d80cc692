//! Astronomy calendar feed adapter.
//!
//! Downloads the yearly in-the-sky.org iCal feed and turns it into raw
//! entries. Filtering happens in [`crate::classify`].

use std::collections::BTreeSet;

use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::classify::{classify, horizon_end};
use crate::clock::{Clock, FixedClock};
use crate::constants::ASTRONOMY_FEED_URL;
use crate::error::{SkyError, SkyResult};
use crate::event::{Event, RawEntry};
use crate::http::HttpClient;
use crate::ics::parse_feed;

pub struct AstronomyFeed<'a> {
    client: &'a dyn HttpClient,
    url_template: String,
}

/// Events for one feed year, or why that year is missing.
#[derive(Debug)]
pub struct YearResult {
    pub year: i32,
    pub events: SkyResult<Vec<Event>>,
}

impl<'a> AstronomyFeed<'a> {
    pub fn new(client: &'a dyn HttpClient) -> Self {
        AstronomyFeed {
            client,
            url_template: ASTRONOMY_FEED_URL.to_string(),
        }
    }

    /// Use a different feed location. `{year}` is substituted.
    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    pub fn url_for(&self, year: i32) -> String {
        self.url_template.replace("{year}", &year.to_string())
    }

    /// Fetch and parse the feed for one year.
    pub async fn fetch(&self, year: i32) -> SkyResult<Vec<RawEntry>> {
        let url = self.url_for(year);
        debug!(%url, "fetching astronomy feed");

        let response = self.client.get(&url).await.map_err(|e| match e {
            SkyError::Http(reason) => SkyError::FeedUnreachable { year, reason },
            other => other,
        })?;

        if !response.is_success() {
            return Err(SkyError::FeedStatus {
                year,
                status: response.status,
            });
        }

        let entries = parse_feed(&response.body)?;
        debug!(year, entries = entries.len(), "parsed astronomy feed");
        Ok(entries)
    }

    /// Fetch every year the horizon touches and classify each one.
    ///
    /// Years are fetched one after another. A failed year is logged and
    /// reported in its [`YearResult`] without stopping the others. The clock
    /// is read once, so every year is judged against the same window.
    pub async fn upcoming(&self, horizon_days: i64, clock: &dyn Clock) -> Vec<YearResult> {
        let run_clock = FixedClock::new(clock.now());
        let mut results = Vec::new();

        for year in years_in_horizon(&run_clock, horizon_days) {
            let events = match self.fetch(year).await {
                Ok(entries) => Ok(classify(&entries, horizon_days, &run_clock)),
                Err(e) => {
                    warn!(year, error = %e, "skipping astronomy feed year");
                    Err(e)
                }
            };
            if let Ok(events) = &events {
                info!(year, count = events.len(), "astronomy events in range");
            }
            results.push(YearResult { year, events });
        }

        results
    }
}

/// Distinct calendar years covered by `[now, now + horizon_days]`, ascending.
pub fn years_in_horizon(clock: &dyn Clock, horizon_days: i64) -> Vec<i32> {
    let now = clock.now();
    let end = horizon_end(now, horizon_days).unwrap_or(now);

    [now.year(), end.year()]
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
