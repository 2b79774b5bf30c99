//! # Stations
//!
//! Canonical station model shared by every core component.
//!
//! ```text
//! StationCollection (one snapshot per successful fetch)
//! ├── stations: Arc<[Station]>     // fetch order, never mutated
//! ├── origin: Option<Position>     // where the fetch was made for
//! └── fetched_at: Option<DateTime> // None for the empty startup snapshot
//!
//! Station
//! ├── id: StationId                // name + address + coordinates,
//! │                                //   "#n" suffix on repeats in a snapshot
//! ├── name / address
//! ├── position: Option<Position>
//! └── prices: Vec<FuelPrice>       // one entry per offered fuel
//! ```

use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::core::fuel::FuelType;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// Returns `None` unless both coordinates are finite.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if latitude.is_finite() && longitude.is_finite() {
            Some(Self { latitude, longitude })
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Stable identity of a station across snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    pub fn derive(name: &str, address_line1: &str, position: Option<Position>) -> Self {
        let coords = position
            .map(|p| format!("{:.6},{:.6}", p.latitude, p.longitude))
            .unwrap_or_default();
        Self(format!(
            "{}|{}|{}",
            name.trim().to_lowercase(),
            address_line1.trim().to_lowercase(),
            coords
        ))
    }

    /// The `n`th record in a snapshot that shares this identity.
    fn occurrence(&self, n: usize) -> Self {
        Self(format!("{}#{}", self.0, n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state_province: String,
    pub country: String,
}

impl Address {
    /// "line1, city, state, country", skipping blank parts.
    pub fn one_line(&self) -> String {
        [
            self.line1.as_str(),
            self.city.as_str(),
            self.state_province.as_str(),
            self.country.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelPrice {
    pub fuel: FuelType,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub address: Address,
    pub position: Option<Position>,
    pub prices: Vec<FuelPrice>,
}

impl Station {
    pub fn new(
        name: impl Into<String>,
        address: Address,
        position: Option<Position>,
        prices: Vec<FuelPrice>,
    ) -> Self {
        let name = name.into();
        Self {
            id: StationId::derive(&name, &address.line1, position),
            name,
            address,
            position,
            prices,
        }
    }

    /// Price for `fuel`, or `None` when the station does not offer it.
    ///
    /// Negative and non-finite prices count as not offered.
    pub fn price_for(&self, fuel: FuelType) -> Option<f64> {
        self.prices
            .iter()
            .find(|entry| entry.fuel == fuel)
            .map(|entry| entry.price)
            .filter(|price| price.is_finite() && *price >= 0.0)
    }

    pub fn offers(&self, fuel: FuelType) -> bool {
        self.price_for(fuel).is_some()
    }
}

/// One immutable fetch result. Cloning shares the underlying stations.
#[derive(Debug, Clone, Default)]
pub struct StationCollection {
    stations: Arc<[Station]>,
    origin: Option<Position>,
    fetched_at: Option<DateTime<Local>>,
}

impl StationCollection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Station ids are unique within the snapshot: repeats of an identity
    /// get an occurrence suffix in fetch order.
    pub fn new(mut stations: Vec<Station>, origin: Position, fetched_at: DateTime<Local>) -> Self {
        let mut seen: HashSet<StationId> = HashSet::with_capacity(stations.len());
        for station in &mut stations {
            if seen.insert(station.id.clone()) {
                continue;
            }
            let base = station.id.clone();
            let mut n = 2;
            while !seen.insert(base.occurrence(n)) {
                n += 1;
            }
            station.id = base.occurrence(n);
        }
        Self {
            stations: stations.into(),
            origin: Some(origin),
            fetched_at: Some(fetched_at),
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// True when both handles point at the same snapshot.
    pub fn same_snapshot(&self, other: &StationCollection) -> bool {
        Arc::ptr_eq(&self.stations, &other.stations)
    }
}
