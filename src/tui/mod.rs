//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and carries out the
//! effects `update()` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! key ──▶ TuiEvent ──▶ Action ──▶ update() ──▶ [Effect]
//!                                   ▲            │
//!                                   │            ├─ Fetch    → tokio task running FetchPipeline
//!                                   │            │             (aborts the superseded one)
//!       FetchCompleted over mpsc ───┘            ├─ Present  → TuiState (PresentationSink)
//!                                                └─ Quit
//! ```
//!
//! Redraws only happen after an event, a finished fetch, or while a fetch
//! is in flight (to keep the loading marker honest).

mod component;
mod components;
mod event;
mod style;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::focus::FocusEffect;
use crate::core::fuel::FuelType;
use crate::core::presentation::PresentationSink;
use crate::core::state::App;
use crate::core::state::FetchToken;
use crate::core::station::{Station, StationCollection};
use crate::core::view::ViewMode;
use crate::location::{FixedPosition, NoPosition, PositionProvider};
use crate::stations::providers::HttpStationSource;
use crate::stations::{FetchPipeline, StationRepository};
use crate::tui::component::EventHandler;
use crate::tui::components::{MapView, RankedListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic).
///
/// Only ever changed through [`PresentationSink`], so what is on screen is
/// exactly what the core last asked for.
pub struct TuiState {
    /// Stations pinned on the map.
    pub pins: StationCollection,
    pub ranked: Vec<Station>,
    pub ranked_fuel: Option<FuelType>,
    pub map: MapView,
    pub ranked_list: RankedListState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            pins: StationCollection::empty(),
            ranked: Vec::new(),
            ranked_fuel: None,
            map: MapView::default(),
            ranked_list: RankedListState::new(),
        }
    }
}

impl PresentationSink for TuiState {
    fn place_pins(&mut self, stations: &StationCollection) {
        debug!("Placing {} pins", stations.len());
        self.pins = stations.clone();
        if let Some(origin) = stations.origin() {
            self.map.center = Some(origin);
        }
    }

    fn show_ranked(&mut self, fuel: Option<FuelType>, stations: &[Station]) {
        self.ranked = stations.to_vec();
        self.ranked_fuel = fuel;
        self.ranked_list.reset();
    }

    fn apply_focus(&mut self, effect: &FocusEffect) {
        match effect {
            FocusEffect::CenterOn { position, .. } => self.map.center = Some(*position),
            FocusEffect::RevealDetail { station } => self.map.callout = Some(station.clone()),
            FocusEffect::CancelReveal { station } => {
                if self.map.callout.as_ref() == Some(station) {
                    self.map.callout = None;
                }
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build the fetch pipeline from a resolved config.
pub fn build_pipeline(config: &ResolvedConfig) -> std::io::Result<FetchPipeline> {
    let source = HttpStationSource::new(
        config.api_base_url.clone(),
        config.radius_m,
        Duration::from_secs(config.api_timeout_secs),
    )
    .map_err(std::io::Error::other)?;
    info!("Station endpoint: {}", source.base_url());

    let positions: Arc<dyn PositionProvider> = match config.device_position {
        Some(position) => Arc::new(FixedPosition(position)),
        None => Arc::new(NoPosition),
    };

    Ok(FetchPipeline::new(
        positions,
        StationRepository::new(Arc::new(source)),
        config.default_position,
        Duration::from_secs(config.location_timeout_secs),
    ))
}

fn to_action(event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::SelectFuel(fuel) => Some(Action::SelectFuel(*fuel)),
        TuiEvent::ToggleView => Some(Action::ToggleView),
        TuiEvent::ShowView(mode) => Some(Action::ShowView(*mode)),
        TuiEvent::Refresh => Some(Action::Refresh),
        TuiEvent::DismissAdvisory => Some(Action::DismissAdvisory),
        _ => None,
    }
}

/// Spawns fetches and keeps the newest one abortable. Starting a fetch
/// aborts the one it supersedes.
struct FetchRunner {
    pipeline: FetchPipeline,
    tx: mpsc::Sender<Action>,
    active: Option<AbortHandle>,
}

impl FetchRunner {
    fn new(pipeline: FetchPipeline, tx: mpsc::Sender<Action>) -> Self {
        Self {
            pipeline,
            tx,
            active: None,
        }
    }

    fn start(&mut self, token: FetchToken) {
        if let Some(handle) = self.active.take()
            && !handle.is_finished()
        {
            info!("Aborting superseded fetch");
            handle.abort();
        }
        self.active = Some(spawn_fetch(self.pipeline.clone(), token, self.tx.clone()));
    }
}

/// Runs `action` through the core and carries out the effects.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action, fetches: &mut FetchRunner) -> bool {
    let mut quit = false;
    for effect in update(app, action) {
        match effect {
            Effect::Fetch(token) => fetches.start(token),
            Effect::Present(presentation) => presentation.deliver(tui),
            Effect::Quit => quit = true,
        }
    }
    quit
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let pipeline = build_pipeline(&config)?;
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();
    let refresh_every = config.refresh_secs.filter(|s| *s > 0).map(Duration::from_secs);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut fetches = FetchRunner::new(pipeline, tx);

    let mut should_quit = dispatch(&mut app, &mut tui, Action::Refresh, &mut fetches);
    let mut last_refresh = Instant::now();
    let mut needs_redraw = true;

    while !should_quit {
        if needs_redraw || app.is_loading {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = to_action(&event) {
                if matches!(action, Action::Refresh) {
                    last_refresh = Instant::now();
                }
                if dispatch(&mut app, &mut tui, action, &mut fetches) {
                    should_quit = true;
                    break;
                }
            } else if app.mode() == ViewMode::Ranked {
                tui.ranked_list.handle_event(&event);
            }
        }

        if let Some(every) = refresh_every
            && !app.is_loading
            && last_refresh.elapsed() >= every
        {
            info!("Auto refresh after {}s", every.as_secs());
            last_refresh = Instant::now();
            needs_redraw = true;
            should_quit |= dispatch(&mut app, &mut tui, Action::Refresh, &mut fetches);
        }

        // Handle background task actions (finished fetches)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= dispatch(&mut app, &mut tui, action, &mut fetches);
        }
    }

    info!("fuelmap shutting down");
    ratatui::restore();
    Ok(())
}

fn spawn_fetch(pipeline: FetchPipeline, token: FetchToken, tx: mpsc::Sender<Action>) -> AbortHandle {
    info!("Spawning fetch (token {})", token.value());
    let handle = tokio::spawn(async move {
        let action = pipeline.run(token).await;
        if tx.send(action).is_err() {
            warn!(
                "Failed to deliver fetch result (token {}): receiver dropped",
                token.value()
            );
        }
    });
    handle.abort_handle()
}
