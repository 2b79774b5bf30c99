//! # Fuel Types
//!
//! The closed set of fuels a station can price. Stations report fuels by
//! display label ("Unleaded 91", "Diesel", ...); everything past the station
//! repository works with [`FuelType`] only.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
pub enum FuelType {
    #[value(name = "91")]
    #[serde(rename = "Unleaded 91")]
    Unleaded91,
    #[value(name = "95")]
    #[serde(rename = "Unleaded 95")]
    Unleaded95,
    #[value(name = "98")]
    #[serde(rename = "Unleaded 98")]
    Unleaded98,
    #[value(name = "diesel")]
    #[serde(rename = "Diesel")]
    Diesel,
}

impl FuelType {
    /// Display order used by the fuel bar and the price badges.
    pub const ALL: [FuelType; 4] = [
        FuelType::Unleaded91,
        FuelType::Unleaded95,
        FuelType::Unleaded98,
        FuelType::Diesel,
    ];

    /// The label stations use on the wire.
    pub fn label(self) -> &'static str {
        match self {
            FuelType::Unleaded91 => "Unleaded 91",
            FuelType::Unleaded95 => "Unleaded 95",
            FuelType::Unleaded98 => "Unleaded 98",
            FuelType::Diesel => "Diesel",
        }
    }

    /// Short label for narrow widgets (fuel buttons, map pins).
    pub fn short_label(self) -> &'static str {
        match self {
            FuelType::Unleaded91 => "91",
            FuelType::Unleaded95 => "95",
            FuelType::Unleaded98 => "98",
            FuelType::Diesel => "D",
        }
    }

    /// Maps a selector key (`'1'`..`'4'`) to a fuel type.
    pub fn from_key(key: char) -> Option<FuelType> {
        key.to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFuel(pub String);

impl fmt::Display for UnknownFuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown fuel type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownFuel {}

impl FromStr for FuelType {
    type Err = UnknownFuel;

    /// Accepts the wire labels plus the short forms people type.
    /// Matching ignores case and inner whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squashed: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match squashed.as_str() {
            "unleaded91" | "u91" | "91" => Ok(FuelType::Unleaded91),
            "unleaded95" | "u95" | "95" => Ok(FuelType::Unleaded95),
            "unleaded98" | "u98" | "98" => Ok(FuelType::Unleaded98),
            "diesel" | "d" => Ok(FuelType::Diesel),
            _ => Err(UnknownFuel(s.to_string())),
        }
    }
}
