//! Import fuel stations from an OPIS price CSV into the station snapshot.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fuel_server::cache::{CachedGeocoder, MokaResultCache};
use fuel_server::config::AppConfig;
use fuel_server::mapquest::MapQuestClient;
use fuel_server::store::{
    ImportOptions, MemoryStationStore, StationSnapshot, StationSnapshotConfig, import_stations,
};

#[derive(Debug, Parser)]
#[command(name = "import-stations", about = "Import fuel stations from CSV")]
struct Args {
    /// CSV file with OPIS truckstop prices
    csv: PathBuf,

    /// Snapshot to update (defaults to STATIONS_SNAPSHOT or stations.json)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Store stations without coordinates; they are geocoded on first lookup
    #[arg(long)]
    skip_geocode: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env().context("failed to read configuration")?;

    let snapshot_config = args
        .snapshot
        .map(StationSnapshotConfig::new)
        .unwrap_or(config.snapshot);
    let snapshot = StationSnapshot::new(snapshot_config);

    // Start from what is already there so re-imports update by id
    let store = MemoryStationStore::from_stations(
        snapshot.load().context("failed to load existing snapshot")?,
    );

    let client = MapQuestClient::new(config.mapquest).context("failed to create MapQuest client")?;
    let geocoder = CachedGeocoder::new(client, MokaResultCache::new(&config.cache), config.cache.ttl);

    let file = File::open(&args.csv)
        .with_context(|| format!("failed to open {}", args.csv.display()))?;

    let options = ImportOptions::default().with_skip_geocode(args.skip_geocode);
    let summary = import_stations(BufReader::new(file), &store, &geocoder, &options)
        .await
        .context("import failed")?;

    snapshot
        .save(&store.all().await)
        .context("failed to save snapshot")?;

    info!(
        processed = summary.processed,
        imported = summary.imported(),
        failed = summary.failed,
        path = %snapshot.path().display(),
        "snapshot saved"
    );

    Ok(())
}
