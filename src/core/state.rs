//! # Application State
//!
//! Core business state for fuelmap. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── stations: StationCollection   // latest good snapshot
//! ├── fuel: Option<FuelType>        // None = no selection
//! ├── focus: FocusCoordinator       // cheapest station for `fuel`
//! ├── view: ViewStateMachine        // Spatial | Ranked
//! ├── fetches: FetchGeneration      // token of the newest fetch request
//! ├── position: Option<PositionFix> // where the last fetch looked
//! ├── is_loading: bool              // a fetch is in flight
//! ├── advisory: Option<String>      // non-fatal problem for the user
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! One action is one atomic step, so a new snapshot is never visible
//! alongside a stale focus.

use crate::core::config::ResolvedConfig;
use crate::core::error::CoreError;
use crate::core::focus::FocusCoordinator;
use crate::core::fuel::FuelType;
use crate::core::station::{Position, StationCollection};
use crate::core::view::{ViewMode, ViewStateMachine};

/// Identifies one fetch request. Only the newest token may update state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic source of [`FetchToken`]s.
#[derive(Debug, Default)]
pub struct FetchGeneration {
    latest: u64,
}

impl FetchGeneration {
    /// Issues a new token, superseding every earlier one.
    pub fn issue(&mut self) -> FetchToken {
        self.latest += 1;
        FetchToken(self.latest)
    }

    pub fn is_current(&self, token: FetchToken) -> bool {
        token.0 == self.latest
    }
}

/// The position a fetch was made for and whether it is a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFix {
    pub position: Position,
    /// Set when the device position was unavailable and the default was used.
    pub fallback: Option<CoreError>,
}

impl PositionFix {
    pub fn located(position: Position) -> Self {
        Self {
            position,
            fallback: None,
        }
    }

    pub fn defaulted(position: Position, reason: CoreError) -> Self {
        Self {
            position,
            fallback: Some(reason),
        }
    }

    pub fn is_default(&self) -> bool {
        self.fallback.is_some()
    }
}

pub struct App {
    pub stations: StationCollection,
    pub fuel: Option<FuelType>,
    pub focus: FocusCoordinator,
    pub view: ViewStateMachine,
    pub fetches: FetchGeneration,
    pub position: Option<PositionFix>,
    pub is_loading: bool,
    pub advisory: Option<String>,
    pub status_message: String,
}

impl App {
    pub fn new(fuel: Option<FuelType>, mode: ViewMode) -> Self {
        Self {
            stations: StationCollection::empty(),
            fuel,
            focus: FocusCoordinator::new(),
            view: ViewStateMachine::new(mode),
            fetches: FetchGeneration::default(),
            position: None,
            is_loading: false,
            advisory: None,
            status_message: String::from("Welcome to fuelmap!"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.fuel, config.start_view)
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to fuelmap!");
        assert!(!app.is_loading);
        assert!(app.stations.is_empty());
        assert!(app.focus.focused().is_none());
        assert_eq!(app.fuel, Some(FuelType::Unleaded91));
        assert_eq!(app.mode(), ViewMode::Spatial);
    }

    #[test]
    fn test_newer_token_supersedes_older() {
        let mut fetches = FetchGeneration::default();
        let first = fetches.issue();
        assert!(fetches.is_current(first));

        let second = fetches.issue();
        assert!(second > first);
        assert!(fetches.is_current(second));
        assert!(!fetches.is_current(first));
    }
}
