//! Fixed endpoints and defaults.

/// Yearly astronomy calendar from in-the-sky.org. `{year}` is substituted.
pub const ASTRONOMY_FEED_URL: &str =
    "https://in-the-sky.org/newscalyear_ical.php?maxdiff=7&year={year}";

/// N2YO visual passes endpoint (without the satellite/location path segments)
pub const N2YO_VISUAL_PASSES_URL: &str = "https://api.n2yo.com/rest/v1/satellite/visualpasses";

/// NORAD catalog number of the International Space Station
pub const ISS_NORAD_ID: u32 = 25544;

pub const N2YO_API_KEY_ENV: &str = "N2YO_API_KEY";

pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";
pub const DEFAULT_ALTITUDE_M: i32 = 50;
pub const DEFAULT_HORIZON_DAYS: i64 = 14;
/// About a century; longer horizons are rejected on the command line
pub const MAX_HORIZON_DAYS: i64 = 36_500;
/// Passes peaking lower than this are usually lost behind trees and buildings
pub const DEFAULT_MIN_ELEVATION_DEG: u32 = 10;
pub const DEFAULT_NOTIFY_COUNT: usize = 2;

/// Calendar entry names must contain one of these (case-insensitive)
pub const KEYWORDS: [&str; 2] = ["meteor shower", "eclipse"];
