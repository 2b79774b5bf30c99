//! # Ranking Engine
//!
//! Orders stations by price for one fuel type. Stations that don't offer the
//! fuel are left out of that fuel's ranking entirely.

use std::cmp::Ordering;

use crate::core::fuel::FuelType;
use crate::core::station::Station;

/// Returns a new vector of stations offering `fuel`, cheapest first.
///
/// `sort_by` is stable: equal prices keep their input order, which keeps the
/// head of the ranking identical to [`cheapest`](crate::core::selector::cheapest).
pub fn rank(stations: &[Station], fuel: FuelType) -> Vec<Station> {
    let mut priced: Vec<(f64, &Station)> = stations
        .iter()
        .filter_map(|station| station.price_for(fuel).map(|price| (price, station)))
        .collect();

    // price_for only yields finite prices, so partial_cmp never returns None
    priced.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    priced.into_iter().map(|(_, station)| station.clone()).collect()
}
