use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A station record as the station API sends it.
///
/// The API is loose about types: coordinates and prices arrive as numbers
/// or numeric strings, and any field may be null. Everything is kept as
/// received here; the repository decides what is usable.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawStation {
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
    /// Fuel labels, index-aligned with `prices`.
    #[serde(default)]
    pub fuel_types: Option<Vec<Value>>,
    #[serde(default)]
    pub prices: Option<Vec<Value>>,
}

/// Response body: either a bare array or an object wrapping one.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum StationsPayload {
    List(Vec<RawStation>),
    Wrapped {
        #[serde(alias = "results", alias = "data")]
        stations: Vec<RawStation>,
    },
}

impl StationsPayload {
    pub fn into_stations(self) -> Vec<RawStation> {
        match self {
            StationsPayload::List(stations) => stations,
            StationsPayload::Wrapped { stations } => stations,
        }
    }
}

/// Reads a JSON number or numeric string. Anything else is `None`.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}
