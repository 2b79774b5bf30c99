//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use chrono::Local;
use serde_json::{Value, json};

use crate::core::focus::FocusEffect;
use crate::core::fuel::FuelType;
use crate::core::presentation::PresentationSink;
use crate::core::state::App;
use crate::core::station::{Address, FuelPrice, Position, Station, StationCollection};
use crate::core::view::ViewMode;
use crate::stations::source::{SourceError, StationSource};
use crate::stations::types::RawStation;

/// A station with no coordinates.
pub fn station(name: &str, prices: &[(FuelType, f64)]) -> Station {
    Station::new(name, address(name), None, fuel_prices(prices))
}

pub fn station_at(name: &str, latitude: f64, longitude: f64, prices: &[(FuelType, f64)]) -> Station {
    Station::new(
        name,
        address(name),
        Position::new(latitude, longitude),
        fuel_prices(prices),
    )
}

fn address(name: &str) -> Address {
    Address {
        line1: format!("1 {name} Road"),
        city: "Christchurch".to_string(),
        country: "New Zealand".to_string(),
        ..Address::default()
    }
}

fn fuel_prices(prices: &[(FuelType, f64)]) -> Vec<FuelPrice> {
    prices
        .iter()
        .map(|&(fuel, price)| FuelPrice { fuel, price })
        .collect()
}

pub fn names(stations: &[Station]) -> Vec<&str> {
    stations.iter().map(|s| s.name.as_str()).collect()
}

/// Shell {91: 2.10, 95: 2.30} then BP {91: 2.05, Diesel: 2.00}.
pub fn end_to_end_stations() -> Vec<Station> {
    use FuelType::*;
    vec![
        station_at("Shell", -43.530, 172.630, &[(Unleaded91, 2.10), (Unleaded95, 2.30)]),
        station_at("BP", -43.520, 172.640, &[(Unleaded91, 2.05), (Diesel, 2.00)]),
    ]
}

pub fn end_to_end_collection() -> StationCollection {
    StationCollection::new(end_to_end_stations(), test_position(), Local::now())
}

pub fn test_position() -> Position {
    Position {
        latitude: -43.5321,
        longitude: 172.6362,
    }
}

/// Creates a test App: Unleaded 91 selected, map view.
pub fn test_app() -> App {
    App::new(Some(FuelType::Unleaded91), ViewMode::Spatial)
}

// ============================================================================
// Presentation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Pins(usize),
    Ranked(Vec<String>),
    Focus(FocusEffect),
}

/// Records every presentation request in delivery order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
    pub last_ranked: Option<Vec<Station>>,
}

impl PresentationSink for RecordingSink {
    fn place_pins(&mut self, stations: &StationCollection) {
        self.events.push(SinkEvent::Pins(stations.len()));
    }

    fn show_ranked(&mut self, _fuel: Option<FuelType>, stations: &[Station]) {
        self.events.push(SinkEvent::Ranked(
            stations.iter().map(|s| s.name.clone()).collect(),
        ));
        self.last_ranked = Some(stations.to_vec());
    }

    fn apply_focus(&mut self, effect: &FocusEffect) {
        self.events.push(SinkEvent::Focus(effect.clone()));
    }
}

// ============================================================================
// Station sources
// ============================================================================

enum Canned {
    Stations(Vec<RawStation>),
    Failure(Box<dyn Fn() -> SourceError + Send + Sync>),
}

/// A source that answers every fetch with the same canned outcome.
pub struct CannedSource {
    outcome: Canned,
}

impl CannedSource {
    pub fn ok(stations: Vec<RawStation>) -> Self {
        Self {
            outcome: Canned::Stations(stations),
        }
    }

    pub fn err<F>(make_error: F) -> Self
    where
        F: Fn() -> SourceError + Send + Sync + 'static,
    {
        Self {
            outcome: Canned::Failure(Box::new(make_error)),
        }
    }
}

#[async_trait]
impl StationSource for CannedSource {
    fn name(&self) -> &str {
        "canned"
    }

    async fn fetch(&self, _position: Position) -> Result<Vec<RawStation>, SourceError> {
        match &self.outcome {
            Canned::Stations(stations) => Ok(stations.clone()),
            Canned::Failure(make_error) => Err(make_error()),
        }
    }
}

/// A raw record with coordinates and the given fuel/price arrays.
pub fn raw_station(name: &str, fuels: Value, prices: Value) -> RawStation {
    RawStation {
        location_name: Some(name.to_string()),
        address_line1: Some(format!("1 {name} Road")),
        city: Some("Christchurch".to_string()),
        country: Some("New Zealand".to_string()),
        latitude: Some(json!(-43.53)),
        longitude: Some(json!(172.63)),
        fuel_types: fuels.as_array().cloned(),
        prices: prices.as_array().cloned(),
        ..RawStation::default()
    }
}
