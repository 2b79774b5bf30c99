//! # Presentation Requests
//!
//! What the core asks the presentation layer to show. The core builds these
//! values; an adapter implementing [`PresentationSink`] carries them out.

use crate::core::focus::FocusEffect;
use crate::core::fuel::FuelType;
use crate::core::station::{Station, StationCollection};

#[derive(Debug, Clone)]
pub enum Presentation {
    /// Replace every pin on the map with this snapshot.
    Pins(StationCollection),
    /// Replace the ranked list. `fuel` is the fuel it was ranked by.
    Ranked {
        fuel: Option<FuelType>,
        stations: Vec<Station>,
    },
    Focus(FocusEffect),
}

impl Presentation {
    pub fn deliver(&self, sink: &mut dyn PresentationSink) {
        match self {
            Presentation::Pins(collection) => sink.place_pins(collection),
            Presentation::Ranked { fuel, stations } => sink.show_ranked(*fuel, stations),
            Presentation::Focus(effect) => sink.apply_focus(effect),
        }
    }
}

/// The consumer side of the presentation boundary.
pub trait PresentationSink {
    fn place_pins(&mut self, stations: &StationCollection);

    fn show_ranked(&mut self, fuel: Option<FuelType>, stations: &[Station]);

    fn apply_focus(&mut self, effect: &FocusEffect);
}
