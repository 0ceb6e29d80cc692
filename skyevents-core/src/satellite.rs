//! ISS visible-pass adapter backed by the N2YO REST API.
//!
//! Pass predictions are a bonus on top of the astronomy feed, so this adapter
//! never fails: a missing key, a transport error, a bad status or an
//! undecodable body all come back as [`PassLookup::Skipped`].

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::constants::{ISS_NORAD_ID, N2YO_VISUAL_PASSES_URL};
use crate::event::{Event, EventKind, EventSource};
use crate::http::HttpClient;

/// Observer location and search parameters for a pass lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PassQuery {
    pub lat: f64,
    pub lon: f64,
    pub alt_m: i32,
    pub days: i64,
    pub min_elevation_deg: u32,
}

/// Why a pass lookup produced nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No API key configured; no request was made
    MissingApiKey,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PassLookup {
    Passes(Vec<Event>),
    Skipped(SkipReason),
}

impl PassLookup {
    pub fn events(&self) -> &[Event] {
        match self {
            PassLookup::Passes(events) => events,
            PassLookup::Skipped(_) => &[],
        }
    }

    pub fn into_events(self) -> Vec<Event> {
        match self {
            PassLookup::Passes(events) => events,
            PassLookup::Skipped(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VisualPassesResponse {
    #[serde(default)]
    passes: Option<Vec<PassRecord>>,
    /// N2YO answers 200 with an `error` field for a bad key
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PassRecord {
    #[serde(rename = "startUTC", default)]
    start_utc: i64,
    #[serde(rename = "endUTC", default)]
    end_utc: i64,
    #[serde(rename = "maxEl", default)]
    max_el: f64,
    #[serde(default)]
    mag: Option<f64>,
}

pub struct SatellitePasses<'a> {
    client: &'a dyn HttpClient,
    api_key: Option<String>,
    tz: Tz,
}

impl<'a> SatellitePasses<'a> {
    /// Blank keys count as missing.
    pub fn new(client: &'a dyn HttpClient, api_key: Option<String>, tz: Tz) -> Self {
        SatellitePasses {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            tz,
        }
    }

    fn url_for(&self, query: &PassQuery, api_key: &str) -> String {
        format!(
            "{}/{}/{:.4}/{:.4}/{}/{}/{}/&apiKey={}",
            N2YO_VISUAL_PASSES_URL,
            ISS_NORAD_ID,
            query.lat,
            query.lon,
            query.alt_m,
            query.days,
            query.min_elevation_deg,
            api_key
        )
    }

    /// Look up visible ISS passes, sorted by start.
    pub async fn fetch_passes(&self, query: &PassQuery) -> PassLookup {
        let Some(api_key) = &self.api_key else {
            debug!("no N2YO API key, skipping pass lookup");
            return PassLookup::Skipped(SkipReason::MissingApiKey);
        };

        let url = self.url_for(query, api_key);
        debug!(url = %url.replace(api_key.as_str(), "***"), "fetching ISS passes");

        match self.request(&url).await {
            Ok(events) => {
                info!(count = events.len(), "ISS passes found");
                PassLookup::Passes(events)
            }
            Err(reason) => {
                warn!(%reason, "ISS pass lookup failed");
                PassLookup::Skipped(SkipReason::Failed(reason))
            }
        }
    }

    async fn request(&self, url: &str) -> Result<Vec<Event>, String> {
        let response = self.client.get(url).await.map_err(|e| e.to_string())?;
        if !response.is_success() {
            return Err(format!("HTTP {}", response.status));
        }

        let parsed: VisualPassesResponse = serde_json::from_str(&response.body)
            .map_err(|e| format!("Failed to decode response: {e}"))?;
        if let Some(error) = parsed.error {
            return Err(error);
        }

        Ok(self.to_events(parsed.passes.unwrap_or_default()))
    }

    fn to_events(&self, passes: Vec<PassRecord>) -> Vec<Event> {
        let mut out: Vec<Event> = passes
            .into_iter()
            .map(|p| Event {
                kind: EventKind::SatellitePass,
                name: format!("ISS visible pass (max elev ~{}°)", p.max_el.trunc() as i64),
                start: epoch_in_zone(p.start_utc, self.tz),
                end: Some(epoch_in_zone(p.end_utc, self.tz)),
                magnitude: p.mag,
                source: EventSource::SatelliteApi,
            })
            .collect();

        out.sort_by_key(|e| e.start);
        out
    }
}

fn epoch_in_zone(secs: i64, tz: Tz) -> DateTime<Tz> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .with_timezone(&tz)
}
