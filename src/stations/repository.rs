//! # Station Repository
//!
//! Turns raw records from a [`StationSource`] into an immutable
//! [`StationCollection`]. Source failures come back as
//! [`CoreError::FetchFailure`]; the caller keeps its previous snapshot.

use std::sync::Arc;

use chrono::Local;
use log::{debug, info, warn};

use super::source::StationSource;
use super::types::{RawStation, as_number};
use crate::core::error::CoreError;
use crate::core::fuel::FuelType;
use crate::core::station::{Address, FuelPrice, Position, Station, StationCollection};

#[derive(Clone)]
pub struct StationRepository {
    source: Arc<dyn StationSource>,
}

impl StationRepository {
    pub fn new(source: Arc<dyn StationSource>) -> Self {
        Self { source }
    }

    /// Fetches a fresh snapshot for `position`.
    ///
    /// Every record the source reports ends up in the snapshot, in source
    /// order; nothing is filtered or deduplicated.
    pub async fn load(&self, position: Position) -> Result<StationCollection, CoreError> {
        if !position.is_valid() {
            return Err(CoreError::fetch_failure(format!(
                "invalid position {}",
                position
            )));
        }

        info!("Fetching stations near {} from {}", position, self.source.name());
        let raw = self.source.fetch(position).await.map_err(|e| {
            warn!("Station fetch from {} failed: {}", self.source.name(), e);
            CoreError::fetch_failure(e.to_string())
        })?;

        let stations: Vec<Station> = raw.into_iter().map(normalize).collect();
        debug!("Normalized {} stations", stations.len());
        Ok(StationCollection::new(stations, position, Local::now()))
    }
}

/// Converts one raw record into a [`Station`].
pub fn normalize(raw: RawStation) -> Station {
    let name = text(raw.location_name);
    let position = match (
        raw.latitude.as_ref().and_then(as_number),
        raw.longitude.as_ref().and_then(as_number),
    ) {
        (Some(lat), Some(lng)) => Position::new(lat, lng),
        _ => {
            warn!("Station {:?} has no usable coordinates", name);
            None
        }
    };

    let fuel_names = raw.fuel_types.unwrap_or_default();
    let prices = raw.prices.unwrap_or_default();
    if fuel_names.len() != prices.len() {
        warn!(
            "Station {:?} lists {} fuel types but {} prices; pairing the first {}",
            name,
            fuel_names.len(),
            prices.len(),
            fuel_names.len().min(prices.len())
        );
    }

    let mut offered: Vec<FuelPrice> = Vec::new();
    for (fuel_name, price) in fuel_names.iter().zip(prices.iter()) {
        let Some(fuel) = fuel_name.as_str().and_then(|s| s.parse::<FuelType>().ok()) else {
            debug!("Skipping unrecognised fuel {} at {:?}", fuel_name, name);
            continue;
        };
        if offered.iter().any(|entry| entry.fuel == fuel) {
            continue;
        }
        match as_number(price).filter(|p| *p >= 0.0) {
            Some(price) => offered.push(FuelPrice { fuel, price }),
            None => debug!("Ignoring malformed {} price {} at {:?}", fuel, price, name),
        }
    }

    let address = Address {
        line1: text(raw.address_line1),
        line2: text(raw.address_line2),
        city: text(raw.city),
        state_province: text(raw.state_province),
        country: text(raw.country),
    };

    Station::new(name, address, position, offered)
}

fn text(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}
