//! Fuel station records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LonLat, StateCode};

/// OPIS truckstop identifier. Stable across imports and used as the upsert key.
pub type OpisId = u32;

/// A persisted fuel station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub opis_id: OpisId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: StateCode,
    /// Supply terminal / price tier identifier.
    pub rack_id: u32,
    /// Retail price per gallon.
    pub price: Decimal,
    /// `LonLat::UNKNOWN` until geocoded.
    pub location: LonLat,
}

impl Station {
    /// Whether this station still carries the sentinel location.
    pub fn needs_geocoding(&self) -> bool {
        self.location.is_unknown()
    }

    /// Free-text address used to geocode this station.
    ///
    /// Empty parts are dropped, so a station without a street address
    /// still geocodes to its city.
    pub fn geocode_query(&self) -> String {
        [self.address.as_str(), self.city.as_str(), self.state.as_str()]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Read-only projection handed to the optimizer.
    pub fn to_fuel_station(&self) -> FuelStation {
        FuelStation {
            id: self.opis_id,
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state,
            price: self.price,
            location: self.location,
        }
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}, {}", self.name, self.city, self.state)
    }
}

/// A station as seen by the optimizer: no rack, no persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelStation {
    pub id: OpisId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: StateCode,
    pub price: Decimal,
    pub location: LonLat,
}
