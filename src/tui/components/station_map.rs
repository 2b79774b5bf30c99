//! # StationMap Component
//!
//! The spatial view: a canvas in longitude/latitude space with one pin per
//! station that has coordinates, the fetch position marked "You are here",
//! and the detail callout for the focused station.
//!
//! The map never decides what to highlight. `MapView` (in `TuiState`) holds
//! the center and the open callout as last requested by the core.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::core::fuel::FuelType;
use crate::core::station::{Position, Station, StationId};
use crate::tui::component::Component;
use crate::tui::style::{SELECTED, fuel_color, format_price, price_badges};

/// Smallest half-width of the visible window, in degrees (about 1 km).
const MIN_HALF_SPAN: f64 = 0.01;

/// Map presentation state as requested by the core.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapView {
    pub center: Option<Position>,
    /// Station whose detail callout is open.
    pub callout: Option<StationId>,
}

pub struct StationMap<'a> {
    pub stations: &'a [Station],
    pub view: &'a MapView,
    /// Where the fetch looked from.
    pub user: Option<Position>,
    pub fuel: Option<FuelType>,
}

impl<'a> StationMap<'a> {
    pub fn new(
        stations: &'a [Station],
        view: &'a MapView,
        user: Option<Position>,
        fuel: Option<FuelType>,
    ) -> Self {
        Self {
            stations,
            view,
            user,
            fuel,
        }
    }

    fn callout_station(&self) -> Option<&'a Station> {
        let id = self.view.callout.as_ref()?;
        self.stations.iter().find(|s| &s.id == id)
    }

    fn pin(&self, station: &Station) -> (String, Style) {
        let focused = self.view.callout.as_ref() == Some(&station.id);
        match self.fuel {
            Some(fuel) if station.offers(fuel) => {
                let style = if focused {
                    Style::default().fg(SELECTED).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(fuel_color(fuel))
                };
                (
                    format!("● {} {}", station.name, format_price(station.price_for(fuel))),
                    style,
                )
            }
            Some(_) => (
                format!("○ {}", station.name),
                Style::default().fg(Color::DarkGray),
            ),
            None => (format!("● {}", station.name), Style::default().fg(Color::White)),
        }
    }

    fn render_callout(&self, frame: &mut Frame, area: Rect, station: &Station) {
        let width = area.width.saturating_sub(2).min(48);
        let height = 5.min(area.height.saturating_sub(1));
        if width < 10 || height < 3 {
            return;
        }
        let callout = Rect::new(area.right() - width - 1, area.y + 1, width, height);

        let mut lines = vec![price_badges(station, self.fuel)];
        let address = station.address.one_line();
        if !address.is_empty() {
            lines.push(Line::styled(address, Style::default().fg(Color::Gray)));
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(SELECTED))
                    .title(format!(" {} ", station.name)),
            );

        frame.render_widget(Clear, callout);
        frame.render_widget(paragraph, callout);
    }
}

impl Component for StationMap<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(center) = self.view.center.or(self.user) else {
            let waiting = Paragraph::new("Waiting for a location...")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Map "));
            frame.render_widget(waiting, area);
            return;
        };

        let (x_bounds, y_bounds) = map_bounds(center, self.user, self.stations);
        let pins: Vec<(f64, f64, String, Style)> = self
            .stations
            .iter()
            .filter_map(|s| {
                let p = s.position?;
                let (label, style) = self.pin(s);
                Some((p.longitude, p.latitude, label, style))
            })
            .collect();
        let user = self.user;

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(" Map "))
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(move |ctx| {
                if let Some(user) = user {
                    ctx.print(
                        user.longitude,
                        user.latitude,
                        Span::styled("◉ You are here", Style::default().fg(Color::Cyan)),
                    );
                }
                ctx.layer();
                for (x, y, label, style) in pins.iter() {
                    ctx.print(*x, *y, Span::styled(label.clone(), *style));
                }
            });
        frame.render_widget(canvas, area);

        if let Some(station) = self.callout_station() {
            self.render_callout(frame, area, station);
        }
    }
}

/// Visible window around `center`: wide enough for every pin and the user
/// marker, never narrower than [`MIN_HALF_SPAN`].
pub fn map_bounds(
    center: Position,
    user: Option<Position>,
    stations: &[Station],
) -> ([f64; 2], [f64; 2]) {
    let half_span = stations
        .iter()
        .filter_map(|s| s.position)
        .chain(user)
        .map(|p| {
            (p.latitude - center.latitude)
                .abs()
                .max((p.longitude - center.longitude).abs())
        })
        .fold(MIN_HALF_SPAN, f64::max)
        * 1.2;

    (
        [center.longitude - half_span, center.longitude + half_span],
        [center.latitude - half_span, center.latitude + half_span],
    )
}
