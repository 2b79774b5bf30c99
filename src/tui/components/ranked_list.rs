//! # RankedList Component
//!
//! The ranked view: one fuel card per station, cheapest first.
//!
//! ```text
//! ┌ 1. BP ─────────────────────────────┐
//! │  91 2.05    D 2.00                 │
//! │ 1 BP Road, Christchurch, NZ        │
//! └────────────────────────────────────┘
//! ```
//!
//! `RankedList` is created each frame and borrows `RankedListState`, which
//! lives in `TuiState` and keeps the scroll offset between frames.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::fuel::FuelType;
use crate::core::station::Station;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::style::{SELECTED, price_badges};

/// Rows per card: border, badges, address, border.
const CARD_HEIGHT: u16 = 4;

#[derive(Default)]
pub struct RankedListState {
    pub scroll_state: ScrollViewState,
    /// Last known viewport and content heights, for clamping between frames.
    pub viewport_height: u16,
    pub content_height: u16,
}

impl RankedListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top; called whenever a new ranking arrives.
    pub fn reset(&mut self) {
        self.scroll_state.set_offset(Position { x: 0, y: 0 });
    }

    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for RankedListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct RankedList<'a> {
    pub stations: &'a [Station],
    /// Fuel the list was ranked by.
    pub fuel: Option<FuelType>,
    state: &'a mut RankedListState,
}

impl<'a> RankedList<'a> {
    pub fn new(
        stations: &'a [Station],
        fuel: Option<FuelType>,
        state: &'a mut RankedListState,
    ) -> Self {
        Self {
            stations,
            fuel,
            state,
        }
    }

    fn card(&self, rank: usize, station: &Station, width: u16) -> Paragraph<'static> {
        let title_width = (width as usize).saturating_sub(4);
        let title = truncate(&format!("{}. {}", rank, station.name), title_width);
        let is_cheapest = rank == 1 && self.fuel.is_some();
        let border_style = if is_cheapest {
            Style::default().fg(SELECTED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Paragraph::new(vec![
            price_badges(station, self.fuel),
            Line::styled(
                truncate(&station.address.one_line(), title_width),
                Style::default().fg(Color::Gray),
            ),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", title))
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        )
    }
}

impl Component for RankedList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.stations.is_empty() {
            let message = match self.fuel {
                Some(fuel) => format!("No stations nearby sell {}.", fuel.label()),
                None => "No stations nearby.".to_string(),
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, area);
            return;
        }

        let content_width = area.width.saturating_sub(1);
        let content_height = CARD_HEIGHT.saturating_mul(self.stations.len() as u16);
        self.state.viewport_height = area.height;
        self.state.content_height = content_height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (i, station) in self.stations.iter().enumerate() {
            let card_area = Rect::new(0, i as u16 * CARD_HEIGHT, content_width, CARD_HEIGHT);
            scroll_view.render_widget(self.card(i + 1, station, content_width), card_area);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Cuts `text` to at most `max_width` terminal columns, ending in "…" when cut.
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
