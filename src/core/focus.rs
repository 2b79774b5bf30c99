//! # Focus Coordinator
//!
//! Single source of truth for which station the map highlights.
//!
//! ```text
//!                  recompute → Some(s)
//!   ┌───────────┐ ─────────────────────▶ ┌──────────────┐
//!   │ Unfocused │                        │ Focused(s)   │ ──┐ recompute → Some(t)
//!   └───────────┘ ◀───────────────────── └──────────────┘ ◀─┘
//!                  recompute → None
//!                  (emits CancelReveal(s))
//! ```
//!
//! The coordinator never draws anything. It returns [`FocusEffect`] requests
//! addressed by station identity and the presentation sink carries them out.
//! Center and reveal requests are only produced while the map is the active
//! view; entering the map again replays them for the current focus.

use crate::core::fuel::FuelType;
use crate::core::selector::cheapest;
use crate::core::station::{Position, Station, StationId};
use crate::core::view::ViewMode;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Focus {
    #[default]
    Unfocused,
    Focused(Station),
}

/// Requests for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FocusEffect {
    CenterOn {
        station: StationId,
        position: Position,
    },
    /// Open the detail callout for `station`, replacing any open callout.
    RevealDetail { station: StationId },
    /// Close the callout for `station` if it is still open.
    CancelReveal { station: StationId },
}

#[derive(Debug, Default)]
pub struct FocusCoordinator {
    focus: Focus,
}

impl FocusCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn focused(&self) -> Option<&Station> {
        match &self.focus {
            Focus::Focused(station) => Some(station),
            Focus::Unfocused => None,
        }
    }

    /// Re-derives the focus from the current stations and fuel selection.
    ///
    /// Called after every collection replacement and every fuel change.
    pub fn recompute(
        &mut self,
        stations: &[Station],
        fuel: Option<FuelType>,
        mode: ViewMode,
    ) -> Vec<FocusEffect> {
        let next = fuel.and_then(|fuel| cheapest(stations, fuel)).cloned();

        match next {
            Some(station) => {
                let effects = match mode {
                    ViewMode::Spatial => reveal_effects(&station),
                    ViewMode::Ranked => Vec::new(),
                };
                self.focus = Focus::Focused(station);
                effects
            }
            None => match std::mem::take(&mut self.focus) {
                Focus::Focused(previous) => vec![FocusEffect::CancelReveal {
                    station: previous.id,
                }],
                Focus::Unfocused => Vec::new(),
            },
        }
    }

    /// Replays center + reveal for the current focus when the map becomes
    /// visible again. Idempotent: calling it twice yields the same effects.
    pub fn enter_spatial(&self) -> Vec<FocusEffect> {
        self.focused().map(reveal_effects).unwrap_or_default()
    }
}

fn reveal_effects(station: &Station) -> Vec<FocusEffect> {
    let mut effects = Vec::with_capacity(2);
    if let Some(position) = station.position {
        effects.push(FocusEffect::CenterOn {
            station: station.id.clone(),
            position,
        });
    }
    effects.push(FocusEffect::RevealDetail {
        station: station.id.clone(),
    });
    effects
}
