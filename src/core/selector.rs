//! # Price Selector
//!
//! Picks the cheapest station for one fuel type.

use crate::core::fuel::FuelType;
use crate::core::station::Station;

/// Returns the cheapest station offering `fuel`, or `None` when nobody does.
///
/// Single pass with a strict `<`, so among tied prices the station that comes
/// first in `stations` wins.
pub fn cheapest(stations: &[Station], fuel: FuelType) -> Option<&Station> {
    let mut best: Option<(&Station, f64)> = None;
    for station in stations {
        let Some(price) = station.price_for(fuel) else {
            continue;
        };
        match best {
            Some((_, best_price)) if price >= best_price => {}
            _ => best = Some((station, price)),
        }
    }
    best.map(|(station, _)| station)
}
