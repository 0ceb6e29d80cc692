mod desktop;
mod render;
mod utils;

use anyhow::{Context, Result, bail};
use clap::Parser;
use skyevents_core::astronomy::AstronomyFeed;
use skyevents_core::clock::{Clock, SystemClock, resolve_timezone};
use skyevents_core::config::SkyConfig;
use skyevents_core::constants::{DEFAULT_ALTITUDE_M, DEFAULT_HORIZON_DAYS, MAX_HORIZON_DAYS};
use skyevents_core::http::ReqwestClient;
use skyevents_core::merge::merge;
use skyevents_core::notify::{NoopSink, NotificationSink, dispatch};
use skyevents_core::satellite::{PassQuery, SatellitePasses};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use render::Render;
use utils::tui::with_spinner;

#[derive(Parser)]
#[command(name = "skyevents")]
#[command(about = "Upcoming meteor showers, eclipses and visible ISS passes for your location")]
struct Cli {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, value_parser = parse_latitude)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, value_parser = parse_longitude)]
    lon: f64,

    /// Altitude in meters (rough is fine)
    #[arg(long, default_value_t = DEFAULT_ALTITUDE_M, allow_negative_numbers = true)]
    alt: i32,

    /// Lookahead horizon in days
    #[arg(
        long,
        default_value_t = DEFAULT_HORIZON_DAYS,
        value_parser = clap::value_parser!(i64).range(0..=MAX_HORIZON_DAYS)
    )]
    days: i64,

    /// Show desktop notifications for the soonest upcoming events
    #[arg(long)]
    notify: bool,

    /// Timezone for listing and comparing times (IANA name or "local")
    #[arg(long)]
    tz: Option<String>,

    /// Ignore ISS passes that peak below this elevation (degrees)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=90))]
    min_elevation: Option<u32>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_latitude(s: &str) -> Result<f64, String> {
    parse_degrees(s, 90.0)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    parse_degrees(s, 180.0)
}

fn parse_degrees(s: &str, limit: f64) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(-limit..=limit).contains(&value) {
        return Err(format!("must be between -{limit} and {limit}"));
    }
    Ok(value)
}

/// The flag wins over the config file. clap already bounds the flag, so only
/// the file value is checked here.
fn min_elevation(flag: Option<u32>, config: &SkyConfig) -> Result<u32> {
    if let Some(deg) = flag {
        return Ok(deg);
    }
    if config.min_elevation > 90 {
        bail!(
            "min_elevation in config must be between 0 and 90, got {}",
            config.min_elevation
        );
    }
    Ok(config.min_elevation)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SkyConfig::load().context("Could not load config")?;
    let tz_name = cli.tz.as_deref().unwrap_or(&config.timezone);
    let tz = resolve_timezone(tz_name)?;
    let min_elevation_deg = min_elevation(cli.min_elevation, &config)?;
    let clock = SystemClock::new(tz);
    let client = ReqwestClient::new()?;

    let sink: Box<dyn NotificationSink> = if cli.notify {
        desktop::platform_sink()
    } else {
        Box::new(NoopSink)
    };

    println!("{}", render::banner("Sky Events - Hello SpaceJunkie"));
    println!(
        "{}",
        render::settings(cli.lat, cli.lon, cli.alt, cli.days, &clock.now())
    );

    // Astronomy events
    let feed = AstronomyFeed::new(&client);
    let years = with_spinner(
        "Fetching astronomy calendar...",
        feed.upcoming(cli.days, &clock),
    )
    .await;

    let mut per_year = Vec::new();
    for result in years {
        match result.events {
            Ok(events) => per_year.push(events),
            Err(e) => println!("{}", render::fetch_error(result.year, &e)),
        }
    }
    let astronomy = merge(per_year);

    println!("\n{}", render::heading("Astronomy events coming up:"));
    if astronomy.is_empty() {
        println!("- None found in range");
    }
    for event in &astronomy {
        println!("{}", event.render());
    }

    // ISS passes
    let passes = SatellitePasses::new(&client, config.api_key_from_env(), tz);
    let query = PassQuery {
        lat: cli.lat,
        lon: cli.lon,
        alt_m: cli.alt,
        days: cli.days,
        min_elevation_deg,
    };
    let lookup = with_spinner("Looking up ISS passes...", passes.fetch_passes(&query)).await;

    println!("\n{}", render::heading("ISS passes:"));
    if lookup.events().is_empty() {
        println!("{}", render::no_passes(&lookup));
    }
    for event in lookup.events() {
        println!("{}", event.render());
    }

    // Notifications
    if cli.notify {
        let upcoming = merge([astronomy, lookup.into_events()]);
        for sent in dispatch(&upcoming, config.notify_count, sink.as_ref()) {
            println!("[notify] {}", sent.notification.body);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lat_and_lon_are_required() {
        assert!(Cli::try_parse_from(["skyevents", "--lat", "40.7"]).is_err());
        assert!(Cli::try_parse_from(["skyevents", "--lon", "-74"]).is_err());
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["skyevents", "--lat", "40.7128", "--lon", "-74.006"])
            .expect("Should parse");

        assert_eq!(cli.lat, 40.7128);
        assert_eq!(cli.lon, -74.006);
        assert_eq!(cli.alt, 50);
        assert_eq!(cli.days, 14);
        assert!(!cli.notify);
        assert_eq!(cli.tz, None);
        assert_eq!(cli.min_elevation, None);
    }

    #[test]
    fn all_flags() {
        let cli = Cli::try_parse_from([
            "skyevents", "--lat", "-33.9", "--lon", "151.2", "--alt", "120", "--days", "30",
            "--notify", "--tz", "Australia/Sydney", "--min-elevation", "30",
        ])
        .expect("Should parse");

        assert_eq!(cli.lat, -33.9);
        assert_eq!(cli.alt, 120);
        assert_eq!(cli.days, 30);
        assert!(cli.notify);
        assert_eq!(cli.tz.as_deref(), Some("Australia/Sydney"));
        assert_eq!(cli.min_elevation, Some(30));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(Cli::try_parse_from(["skyevents", "--lat", "91", "--lon", "0"]).is_err());
        assert!(Cli::try_parse_from(["skyevents", "--lat", "0", "--lon", "-180.5"]).is_err());
        assert!(Cli::try_parse_from(["skyevents", "--lat", "north", "--lon", "0"]).is_err());
    }

    #[test]
    fn rejects_negative_horizon() {
        assert!(Cli::try_parse_from(["skyevents", "--lat", "0", "--lon", "0", "--days", "-1"]).is_err());
    }

    #[test]
    fn rejects_oversized_horizon() {
        let parse = |days: &str| {
            Cli::try_parse_from(["skyevents", "--lat", "0", "--lon", "0", "--days", days])
        };

        assert!(parse("100000000").is_err());
        assert!(parse("36501").is_err());
        assert_eq!(parse("36500").expect("Should parse").days, MAX_HORIZON_DAYS);
    }

    #[test]
    fn min_elevation_flag_wins_over_config() {
        let config = SkyConfig {
            min_elevation: 30,
            ..Default::default()
        };

        assert_eq!(min_elevation(Some(5), &config).unwrap(), 5);
        assert_eq!(min_elevation(None, &config).unwrap(), 30);
    }

    #[test]
    fn rejects_config_min_elevation_above_zenith() {
        let config = SkyConfig {
            min_elevation: 95,
            ..Default::default()
        };

        let err = min_elevation(None, &config).unwrap_err();
        assert!(err.to_string().contains("between 0 and 90"));
        // an explicit flag still overrides a bad file value
        assert_eq!(min_elevation(Some(10), &config).unwrap(), 10);
    }
}
