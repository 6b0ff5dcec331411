//! replay — run a recorded fix log through the trailguard engine.
//!
//! Prints one line per fix (entity, timestamp, anomaly labels), then the
//! safety score of every entity seen.
//!
//! Usage:
//!   replay --zones data/zones.json data/fixes.csv
//!   replay --zones data/zones.json --thresholds data/thresholds.json \
//!          --events-out events.csv data/fixes.csv
//!
//! Logging follows `RUST_LOG` (default `info`, or `debug` with `--verbose`).

mod fixes;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tg_core::format_timestamp;
use tg_rules::{Monitor, MonitorConfig, RuleSet, Thresholds};
use tg_score::{CsvEventSink, RecordPolicy};
use tg_zones::{
    DEFAULT_PROVIDER_TIMEOUT, EncodedRoute, StraightLineRoute, ZoneConfig,
    load_zone_file_or_default,
};

#[derive(Parser, Debug)]
#[command(name = "replay", about = "Replay a fix log through the trailguard anomaly engine")]
struct Args {
    /// Fix log: CSV (`entity_id,lat,lon,timestamp`) or a `.json` array
    fixes: PathBuf,

    /// Zone file (restricted/allowed polygons, optional route endpoints)
    #[arg(short, long)]
    zones: Option<PathBuf>,

    /// Thresholds JSON; all four fields required
    #[arg(short, long)]
    thresholds: Option<PathBuf>,

    /// Encoded polyline for the planned route.  Used only when the zone file
    /// names route endpoints; without it the route is the straight segment
    /// between them.
    #[arg(long)]
    route_polyline: Option<String>,

    /// Write every recorded anomaly event to this CSV file
    #[arg(short, long)]
    events_out: Option<PathBuf>,

    /// Record clean fixes as events too (scores recover over clean stretches)
    #[arg(long)]
    every_fix: bool,

    /// Route and road-snap provider timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_PROVIDER_TIMEOUT.as_millis() as u64)]
    provider_timeout_ms: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            record_policy: if self.every_fix { RecordPolicy::EveryFix } else { RecordPolicy::AnomalousOnly },
            provider_timeout: self.provider_timeout(),
            ..MonitorConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let timeout = args.provider_timeout();
    let thresholds = load_thresholds(args.thresholds.as_deref());
    let zone_config = args
        .zones
        .as_deref()
        .map(load_zone_file_or_default)
        .unwrap_or_else(ZoneConfig::default);

    let rules = match &args.route_polyline {
        Some(encoded) => {
            RuleSet::resolve(thresholds, zone_config, &EncodedRoute::new(encoded.as_str()), timeout).await
        }
        None => RuleSet::resolve(thresholds, zone_config, &StraightLineRoute, timeout).await,
    };
    info!(
        restricted = rules.zones.restricted.len(),
        allowed = rules.zones.allowed.len(),
        route_vertices = rules.route.len(),
        "rules ready"
    );

    let mut monitor = Monitor::without_snapping(rules, args.monitor_config());

    let csv_sink = match &args.events_out {
        Some(path) => {
            let sink = Arc::new(CsvEventSink::from_path(path)?);
            monitor = monitor.with_sink(sink.clone());
            Some(sink)
        }
        None => None,
    };

    let fixes = fixes::load_fixes(&args.fixes)?;
    info!(count = fixes.len(), path = %args.fixes.display(), "replaying fixes");

    let mut rejected = 0usize;
    for raw in fixes {
        let entity = raw.entity_id.clone();
        let at = raw.timestamp.clone();
        match monitor.ingest(raw).await {
            Ok(anomalies) if anomalies.is_empty() => println!("{entity}\t{at}\t-"),
            Ok(anomalies) => {
                let labels: Vec<&str> = anomalies.iter().map(|a| a.as_str()).collect();
                println!("{entity}\t{at}\t{}", labels.join(", "));
            }
            Err(_) => rejected += 1,
        }
    }
    if rejected > 0 {
        warn!(rejected, "some fixes were malformed and skipped");
    }

    println!();
    let mut entities = monitor.engine().store().entities();
    entities.sort();
    for entity in &entities {
        let events = monitor.events(entity);
        let last = events.last().map(|e| format_timestamp(e.timestamp));
        println!(
            "{entity}\tscore {:.1}\tevents {}\tlast {}",
            monitor.safety_score(entity),
            events.len(),
            last.as_deref().unwrap_or("-"),
        );
    }

    if let Some(sink) = csv_sink {
        sink.finish()?;
        if let Some(e) = sink.take_error() {
            bail!("writing anomaly events failed: {e}");
        }
    }

    Ok(())
}

/// A bad thresholds file is reported and replaced by the defaults.
fn load_thresholds(path: Option<&Path>) -> Thresholds {
    let Some(path) = path else {
        return Thresholds::default();
    };
    match Thresholds::load(path) {
        Ok(thresholds) => {
            info!(path = %path.display(), ?thresholds, "loaded thresholds");
            thresholds
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "thresholds file unusable; using defaults");
            Thresholds::default()
        }
    }
}
