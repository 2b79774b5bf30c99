//! fuelmap library exports for testing

pub mod core;
pub mod location;
pub mod stations;
pub mod tui;

#[cfg(test)]
pub mod test_support;
