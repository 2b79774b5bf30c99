//! # TitleBar Component
//!
//! Top status bar. Stateless: everything it shows arrives as props.
//!
//! ```text
//! fuelmap | Unleaded 91 | Map | updated 14:03 | 2 stations nearby
//! ```
//!
//! Segments with nothing to say are left out, so a fresh start reads
//! `fuelmap | Unleaded 91 | Map | Welcome to fuelmap!`.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::fuel::FuelType;
use crate::core::view::ViewMode;
use crate::tui::component::Component;

pub struct TitleBar {
    pub fuel: Option<FuelType>,
    pub mode: ViewMode,
    /// When the snapshot on screen was fetched. `None` before the first fetch.
    pub fetched_at: Option<DateTime<Local>>,
    pub status_message: String,
    pub is_loading: bool,
}

impl TitleBar {
    pub fn new(
        fuel: Option<FuelType>,
        mode: ViewMode,
        fetched_at: Option<DateTime<Local>>,
        status_message: String,
        is_loading: bool,
    ) -> Self {
        Self {
            fuel,
            mode,
            fetched_at,
            status_message,
            is_loading,
        }
    }

    fn text(&self) -> String {
        let mut parts = vec![
            self.fuel
                .map(|f| f.label().to_string())
                .unwrap_or_else(|| "No fuel".to_string()),
            self.mode.label().to_string(),
        ];
        if let Some(at) = self.fetched_at {
            parts.push(format!("updated {}", at.format("%H:%M")));
        }
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        if self.is_loading {
            parts.push("⟳".to_string());
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("fuelmap", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" | "),
            Span::raw(self.text()),
        ]);
        frame.render_widget(line, area);
    }
}
