//! # Actions
//!
//! Everything that can happen in fuelmap becomes an `Action`.
//! User presses `2`? That's `Action::SelectFuel(Some(FuelType::Unleaded95))`.
//! A fetch finishes? That's `Action::FetchCompleted { .. }`.
//!
//! The `update()` function takes the current state and an action, applies
//! the whole change as one step, then returns the effects the adapter should
//! run. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + [Effect]
//! ```

use log::{debug, info, warn};

use crate::core::error::CoreError;
use crate::core::fuel::FuelType;
use crate::core::presentation::Presentation;
use crate::core::state::{App, FetchToken, PositionFix};
use crate::core::station::StationCollection;
use crate::core::view::ViewMode;

#[derive(Debug)]
pub enum Action {
    /// Start a new fetch. Any fetch still in flight is superseded.
    Refresh,
    FetchCompleted {
        token: FetchToken,
        position: PositionFix,
        result: Result<StationCollection, CoreError>,
    },
    SelectFuel(Option<FuelType>),
    ToggleView,
    ShowView(ViewMode),
    DismissAdvisory,
    Quit,
}

#[derive(Debug)]
pub enum Effect {
    /// Locate, then fetch stations; report back with `Action::FetchCompleted`.
    Fetch(FetchToken),
    Present(Presentation),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Refresh => {
            let token = app.fetches.issue();
            app.is_loading = true;
            app.status_message = String::from("Fetching stations...");
            debug!("Issued fetch token {}", token.value());
            vec![Effect::Fetch(token)]
        }

        Action::FetchCompleted {
            token,
            position,
            result,
        } => {
            if !app.fetches.is_current(token) {
                debug!("Discarding superseded fetch response (token {})", token.value());
                return Vec::new();
            }
            app.is_loading = false;

            let mut advisories = Vec::new();
            if let Some(reason) = &position.fallback {
                warn!("Using default position: {}", reason);
                advisories.push(reason.advisory());
            }

            let effects = match result {
                Ok(collection) => {
                    info!("Snapshot replaced: {} stations", collection.len());
                    app.position = Some(position);
                    app.stations = collection;
                    app.status_message = format!("{} stations nearby", app.stations.len());
                    let focus_effects =
                        app.focus
                            .recompute(app.stations.stations(), app.fuel, app.view.mode());
                    present(app.view.route(&app.stations, app.fuel, focus_effects, true))
                }
                Err(error) => {
                    warn!("Keeping previous snapshot: {}", error);
                    advisories.push(error.advisory());
                    app.status_message = String::from("Refresh failed");
                    Vec::new()
                }
            };

            app.advisory = if advisories.is_empty() {
                None
            } else {
                Some(advisories.join(" "))
            };
            effects
        }

        Action::SelectFuel(fuel) => {
            if fuel == app.fuel {
                return Vec::new();
            }
            app.fuel = fuel;
            app.status_message = match fuel {
                Some(fuel) => format!("Fuel: {}", fuel.label()),
                None => String::from("No fuel selected"),
            };
            let focus_effects = app
                .focus
                .recompute(app.stations.stations(), app.fuel, app.view.mode());
            present(app.view.route(&app.stations, app.fuel, focus_effects, false))
        }

        Action::ToggleView => {
            let presentations = app.view.toggle(&app.stations, app.fuel, &app.focus);
            app.status_message = format!("View: {}", app.view.mode().label());
            present(presentations)
        }

        Action::ShowView(mode) => {
            let presentations = app.view.switch_to(mode, &app.stations, app.fuel, &app.focus);
            app.status_message = format!("View: {}", mode.label());
            present(presentations)
        }

        Action::DismissAdvisory => {
            app.advisory = None;
            Vec::new()
        }

        Action::Quit => vec![Effect::Quit],
    }
}

fn present(presentations: Vec<Presentation>) -> Vec<Effect> {
    presentations.into_iter().map(Effect::Present).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::focus::{Focus, FocusEffect};
    use crate::core::presentation::PresentationSink;
    use crate::test_support::{
        RecordingSink, SinkEvent, end_to_end_collection, names, test_app, test_position,
    };
    use FuelType::*;

    fn issue(app: &mut App) -> FetchToken {
        match update(app, Action::Refresh).as_slice() {
            [Effect::Fetch(token)] => *token,
            other => panic!("expected a single fetch effect, got {:?}", other),
        }
    }

    fn complete(
        app: &mut App,
        token: FetchToken,
        result: Result<StationCollection, CoreError>,
    ) -> Vec<Effect> {
        update(
            app,
            Action::FetchCompleted {
                token,
                position: PositionFix::located(test_position()),
                result,
            },
        )
    }

    fn deliver(effects: &[Effect], sink: &mut dyn PresentationSink) {
        for effect in effects {
            if let Effect::Present(p) = effect {
                p.deliver(sink);
            }
        }
    }

    fn loaded_app(mode: ViewMode) -> App {
        let mut app = App::new(Some(Unleaded91), mode);
        let token = issue(&mut app);
        complete(&mut app, token, Ok(end_to_end_collection()));
        app
    }

    #[test]
    fn test_refresh_issues_fetch_and_marks_loading() {
        let mut app = test_app();
        let token = issue(&mut app);
        assert!(app.is_loading);
        assert!(app.fetches.is_current(token));
    }

    #[test]
    fn test_successful_fetch_places_pins_and_focuses_cheapest() {
        let mut app = test_app();
        let token = issue(&mut app);

        let effects = complete(&mut app, token, Ok(end_to_end_collection()));
        let mut sink = RecordingSink::default();
        deliver(&effects, &mut sink);

        assert!(!app.is_loading);
        assert_eq!(app.stations.len(), 2);
        assert_eq!(app.focus.focused().map(|s| s.name.as_str()), Some("BP"));
        assert!(matches!(sink.events[0], SinkEvent::Pins(2)));
        assert!(sink.events.iter().any(|e| matches!(e, SinkEvent::Focus(FocusEffect::CenterOn { .. }))));
        assert!(sink.events.iter().any(|e| matches!(e, SinkEvent::Focus(FocusEffect::RevealDetail { .. }))));
        assert!(app.advisory.is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut app = test_app();
        let stale = issue(&mut app);
        let fresh = issue(&mut app);

        complete(&mut app, fresh, Ok(end_to_end_collection()));
        let effects = complete(&mut app, stale, Ok(StationCollection::empty()));

        assert!(effects.is_empty());
        assert_eq!(app.stations.len(), 2);
        assert_eq!(app.focus.focused().map(|s| s.name.as_str()), Some("BP"));
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut app = test_app();
        let stale = issue(&mut app);
        let _fresh = issue(&mut app);

        complete(&mut app, stale, Ok(end_to_end_collection()));

        assert!(app.is_loading);
        assert!(app.stations.is_empty());
    }

    #[test]
    fn test_fetch_failure_preserves_state() {
        let mut app = loaded_app(ViewMode::Ranked);
        let before_snapshot = app.stations.clone();
        let before_focus = app.focus.focus().clone();
        let before_ranking = crate::core::view::ranked_view(app.stations.stations(), app.fuel);

        let token = issue(&mut app);
        let effects = complete(&mut app, token, Err(CoreError::fetch_failure("HTTP 503")));

        assert!(effects.is_empty());
        assert!(app.stations.same_snapshot(&before_snapshot));
        assert_eq!(app.focus.focus(), &before_focus);
        assert_eq!(
            crate::core::view::ranked_view(app.stations.stations(), app.fuel),
            before_ranking
        );
        let advisory = app.advisory.as_deref().unwrap();
        assert!(advisory.contains("HTTP 503"));
        assert!(!app.is_loading);
    }

    #[test]
    fn test_fetch_failure_keeps_previous_position() {
        let mut app = loaded_app(ViewMode::Spatial);
        let elsewhere = crate::core::station::Position::new(-41.29, 174.78).unwrap();

        let token = issue(&mut app);
        update(
            &mut app,
            Action::FetchCompleted {
                token,
                position: PositionFix::defaulted(
                    elsewhere,
                    CoreError::permission_denied("permission denied"),
                ),
                result: Err(CoreError::fetch_failure("offline")),
            },
        );

        assert_eq!(app.position.as_ref().map(|fix| fix.position), Some(test_position()));
        let advisory = app.advisory.as_deref().unwrap();
        assert!(advisory.contains("default position"));
        assert!(advisory.contains("offline"));
    }

    #[test]
    fn test_successful_fetch_clears_previous_advisory() {
        let mut app = test_app();
        let token = issue(&mut app);
        complete(&mut app, token, Err(CoreError::fetch_failure("offline")));
        assert!(app.advisory.is_some());

        let token = issue(&mut app);
        complete(&mut app, token, Ok(end_to_end_collection()));
        assert!(app.advisory.is_none());
    }

    #[test]
    fn test_default_position_produces_advisory_and_continues() {
        let mut app = test_app();
        let token = issue(&mut app);

        update(
            &mut app,
            Action::FetchCompleted {
                token,
                position: PositionFix::defaulted(
                    test_position(),
                    CoreError::permission_denied("permission denied"),
                ),
                result: Ok(end_to_end_collection()),
            },
        );

        assert_eq!(app.stations.len(), 2);
        assert!(app.position.as_ref().unwrap().is_default());
        assert!(app.advisory.as_deref().unwrap().contains("default position"));
    }

    #[test]
    fn test_fuel_change_with_no_offeror_cancels_reveal() {
        let mut app = loaded_app(ViewMode::Spatial);

        let effects = update(&mut app, Action::SelectFuel(Some(Unleaded98)));

        assert_eq!(app.focus.focus(), &Focus::Unfocused);
        assert!(matches!(
            effects.as_slice(),
            [Effect::Present(Presentation::Focus(FocusEffect::CancelReveal { .. }))]
        ));
    }

    #[test]
    fn test_same_fuel_selection_is_a_no_op() {
        let mut app = loaded_app(ViewMode::Spatial);
        assert!(update(&mut app, Action::SelectFuel(Some(Unleaded91))).is_empty());
    }

    #[test]
    fn test_fuel_change_in_ranked_mode_reranks_without_reveal() {
        let mut app = loaded_app(ViewMode::Ranked);

        let effects = update(&mut app, Action::SelectFuel(Some(Diesel)));
        let mut sink = RecordingSink::default();
        deliver(&effects, &mut sink);

        assert_eq!(sink.events.len(), 1);
        assert_eq!(sink.last_ranked.as_deref().map(names), Some(vec!["BP"]));
        assert_eq!(app.focus.focused().map(|s| s.name.as_str()), Some("BP"));
    }

    #[test]
    fn test_switching_modes_keeps_fuel_selection() {
        let mut app = loaded_app(ViewMode::Spatial);
        update(&mut app, Action::ToggleView);
        assert_eq!(app.mode(), ViewMode::Ranked);
        update(&mut app, Action::ToggleView);
        assert_eq!(app.mode(), ViewMode::Spatial);
        assert_eq!(app.fuel, Some(Unleaded91));
    }

    #[test]
    fn test_reentering_spatial_twice_replays_identical_effects() {
        let mut app = loaded_app(ViewMode::Spatial);

        let mut first = RecordingSink::default();
        deliver(&update(&mut app, Action::ShowView(ViewMode::Spatial)), &mut first);
        let mut second = RecordingSink::default();
        deliver(&update(&mut app, Action::ShowView(ViewMode::Spatial)), &mut second);

        assert_eq!(first.events.len(), 2);
        assert_eq!(first.events, second.events);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut app = loaded_app(ViewMode::Spatial);
        assert_eq!(app.focus.focused().unwrap().name, "BP");

        let mut sink = RecordingSink::default();
        deliver(&update(&mut app, Action::ToggleView), &mut sink);
        assert_eq!(sink.last_ranked.as_deref().map(names), Some(vec!["BP", "Shell"]));

        deliver(&update(&mut app, Action::SelectFuel(Some(Diesel))), &mut sink);
        assert_eq!(app.focus.focused().unwrap().name, "BP");
        assert_eq!(sink.last_ranked.as_deref().map(names), Some(vec!["BP"]));
    }

    #[test]
    fn test_dismiss_and_quit() {
        let mut app = test_app();
        app.advisory = Some("something".to_string());
        assert!(update(&mut app, Action::DismissAdvisory).is_empty());
        assert!(app.advisory.is_none());
        assert!(matches!(update(&mut app, Action::Quit).as_slice(), [Effect::Quit]));
    }
}
