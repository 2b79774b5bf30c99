//! # View State Machine
//!
//! Two views over the same snapshot: the map (`Spatial`) and the price list
//! (`Ranked`). Only the user switches between them. This module decides
//! which presentation requests reach the sink after each state change.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::focus::{FocusCoordinator, FocusEffect};
use crate::core::fuel::FuelType;
use crate::core::presentation::Presentation;
use crate::core::ranking::rank;
use crate::core::station::{Station, StationCollection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Spatial,
    Ranked,
}

impl ViewMode {
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Spatial => ViewMode::Ranked,
            ViewMode::Ranked => ViewMode::Spatial,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Spatial => "Map",
            ViewMode::Ranked => "List",
        }
    }
}

/// Ranked list contents for the current selection.
///
/// Without a selected fuel there is nothing to rank by, so the snapshot is
/// listed in fetch order.
pub fn ranked_view(stations: &[Station], fuel: Option<FuelType>) -> Vec<Station> {
    match fuel {
        Some(fuel) => rank(stations, fuel),
        None => stations.to_vec(),
    }
}

#[derive(Debug, Default)]
pub struct ViewStateMachine {
    mode: ViewMode,
}

impl ViewStateMachine {
    pub fn new(mode: ViewMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Enters `mode` and returns what the newly active view needs.
    ///
    /// Entering a mode that is already active still re-emits its output, so
    /// re-entering the map always re-triggers the focus highlight.
    pub fn switch_to(
        &mut self,
        mode: ViewMode,
        stations: &StationCollection,
        fuel: Option<FuelType>,
        focus: &FocusCoordinator,
    ) -> Vec<Presentation> {
        self.mode = mode;
        match mode {
            ViewMode::Spatial => focus
                .enter_spatial()
                .into_iter()
                .map(Presentation::Focus)
                .collect(),
            ViewMode::Ranked => vec![Presentation::Ranked {
                fuel,
                stations: ranked_view(stations.stations(), fuel),
            }],
        }
    }

    pub fn toggle(
        &mut self,
        stations: &StationCollection,
        fuel: Option<FuelType>,
        focus: &FocusCoordinator,
    ) -> Vec<Presentation> {
        self.switch_to(self.mode.toggled(), stations, fuel, focus)
    }

    /// Routes the outcome of a data or fuel change.
    ///
    /// Pins follow every new snapshot whatever the mode, focus requests pass
    /// through as produced, and the ranked list is only rebuilt while visible.
    pub fn route(
        &self,
        stations: &StationCollection,
        fuel: Option<FuelType>,
        focus_effects: Vec<FocusEffect>,
        replaced: bool,
    ) -> Vec<Presentation> {
        let mut out = Vec::new();
        if replaced {
            out.push(Presentation::Pins(stations.clone()));
        }
        out.extend(focus_effects.into_iter().map(Presentation::Focus));
        if self.mode == ViewMode::Ranked {
            out.push(Presentation::Ranked {
                fuel,
                stations: ranked_view(stations.stations(), fuel),
            });
        }
        out
    }
}
