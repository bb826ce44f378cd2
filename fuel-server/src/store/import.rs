//! CSV station import.
//!
//! Reads the OPIS truckstop price export, geocodes each station's address,
//! and upserts it into a `StationStore` keyed by OPIS id. Bad rows are
//! counted and logged; they never abort the import.

use std::io::Read;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{LonLat, OpisId, StateCode, Station};
use crate::provider::{Geocoder, ProviderError};

use super::error::StoreError;
use super::{StationStore, Upsert};

/// Columns the import cannot do without.
const REQUIRED_COLUMNS: [&str; 7] = [
    "OPIS Truckstop ID",
    "Truckstop Name",
    "Address",
    "City",
    "State",
    "Rack ID",
    "Retail Price",
];

/// One CSV row, as text. Parsed into a `Station` by `into_station`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "OPIS Truckstop ID")]
    pub opis_id: String,
    #[serde(rename = "Truckstop Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Rack ID")]
    pub rack_id: String,
    #[serde(rename = "Retail Price")]
    pub price: String,
}

impl StationRecord {
    /// Validate and convert the row. The location starts as the sentinel.
    pub fn into_station(self) -> Result<Station, String> {
        let opis_id = self
            .opis_id
            .parse()
            .map_err(|_| format!("invalid OPIS id {:?}", self.opis_id))?;
        let rack_id = self
            .rack_id
            .parse()
            .map_err(|_| format!("invalid rack id {:?}", self.rack_id))?;
        let price = Decimal::from_str(&self.price)
            .map_err(|_| format!("invalid price {:?}", self.price))?;
        if price.is_sign_negative() {
            return Err(format!("negative price {price}"));
        }
        let state = StateCode::parse_normalized(&self.state).map_err(|e| e.to_string())?;
        if self.name.is_empty() {
            return Err("missing truckstop name".to_string());
        }

        Ok(Station {
            opis_id,
            name: self.name,
            address: self.address,
            city: self.city,
            state,
            rack_id,
            price,
            location: LonLat::UNKNOWN,
        })
    }
}

/// Import behaviour.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Store the sentinel location instead of geocoding.
    pub skip_geocode: bool,
    /// Geocoding attempts per row.
    pub max_attempts: u32,
    /// Wait before the first retry; doubles on each further retry.
    pub base_backoff: Duration,
}

impl ImportOptions {
    /// Skip geocoding entirely.
    pub fn with_skip_geocode(mut self, skip: bool) -> Self {
        self.skip_geocode = skip;
        self
    }

    /// Set the initial retry backoff.
    pub fn with_base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            skip_geocode: false,
            max_attempts: 3,
            base_backoff: Duration::from_secs(1),
        }
    }
}

/// Counts reported at the end of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub processed: usize,
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
}

impl ImportSummary {
    /// Rows that made it into the store.
    pub fn imported(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Parse every row up front, pairing each with its 1-based line number.
fn read_rows<R: Read>(reader: R) -> Result<Vec<(usize, Result<Station, String>)>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    debug!(?headers, "CSV headers");

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::MissingColumns(missing));
    }

    Ok(rdr
        .deserialize::<StationRecord>()
        .enumerate()
        .map(|(idx, record)| {
            // Header is line 1
            let row_number = idx + 2;
            let station = record
                .map_err(|e| e.to_string())
                .and_then(StationRecord::into_station);
            (row_number, station)
        })
        .collect())
}

/// Geocode with exponential backoff on transient failures.
async fn geocode_with_retry<G: Geocoder>(
    geocoder: &G,
    address: &str,
    options: &ImportOptions,
) -> Result<LonLat, ProviderError> {
    let mut attempt = 0;
    loop {
        match geocoder.geocode(address).await {
            Ok(location) => return Ok(location),
            Err(e) if e.is_transient() && attempt + 1 < options.max_attempts => {
                let wait = options.base_backoff * 2u32.pow(attempt);
                debug!(address, attempt, ?wait, error = %e, "geocode failed, retrying");
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Location already stored for `id`, unless it is the sentinel.
async fn stored_location<S: StationStore>(
    store: &S,
    id: OpisId,
) -> Result<Option<LonLat>, StoreError> {
    Ok(store
        .get(id)
        .await?
        .filter(|station| !station.needs_geocoding())
        .map(|station| station.location))
}

/// Import stations from CSV into `store`.
///
/// A row that is not geocoded this time (skipped, or the geocoder failed)
/// keeps the location already stored for its id, if any.
///
/// Returns an error only when the file itself is unusable (unreadable,
/// missing columns) or the store fails. Row-level problems are counted in
/// the summary.
pub async fn import_stations<R, S, G>(
    reader: R,
    store: &S,
    geocoder: &G,
    options: &ImportOptions,
) -> Result<ImportSummary, StoreError>
where
    R: Read,
    S: StationStore,
    G: Geocoder,
{
    let rows = read_rows(reader)?;
    let mut summary = ImportSummary::default();

    for (row_number, parsed) in rows {
        summary.processed += 1;

        let mut station = match parsed {
            Ok(station) => station,
            Err(message) => {
                warn!(row = row_number, %message, "skipping invalid row");
                summary.failed += 1;
                continue;
            }
        };

        if options.skip_geocode {
            if let Some(previous) = stored_location(store, station.opis_id).await? {
                station.location = previous;
            }
        } else {
            let address = station.geocode_query();
            match geocode_with_retry(geocoder, &address, options).await {
                Ok(location) => station.location = location,
                Err(e) => match stored_location(store, station.opis_id).await? {
                    Some(previous) => {
                        warn!(row = row_number, %address, error = %e, "could not geocode station, keeping stored location");
                        station.location = previous;
                    }
                    None => {
                        warn!(row = row_number, %address, error = %e, "could not geocode station");
                        summary.failed += 1;
                        continue;
                    }
                },
            }
        }

        debug!(row = row_number, station = %station, "importing station");

        match store.upsert(station).await? {
            Upsert::Inserted => summary.inserted += 1,
            Upsert::Updated => summary.updated += 1,
        }
    }

    info!(
        processed = summary.processed,
        inserted = summary.inserted,
        updated = summary.updated,
        failed = summary.failed,
        "station import complete"
    );

    Ok(summary)
}
