//! Colours and formatting shared by the fuel components.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::fuel::FuelType;
use crate::core::station::Station;

/// Highlight for the selected fuel, wherever it appears.
pub const SELECTED: Color = Color::Rgb(0x62, 0x00, 0xee);

pub fn fuel_color(fuel: FuelType) -> Color {
    match fuel {
        FuelType::Unleaded91 => Color::Rgb(0x00, 0xbf, 0xff),
        FuelType::Unleaded95 => Color::Rgb(0xff, 0xa5, 0x00),
        FuelType::Unleaded98 => Color::Rgb(0xff, 0x45, 0x00),
        FuelType::Diesel => Color::Rgb(0x50, 0x50, 0x50),
    }
}

/// Badge style for `fuel`; the selected fuel is drawn white on purple.
pub fn badge_style(fuel: FuelType, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::White)
            .bg(SELECTED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Black).bg(fuel_color(fuel))
    }
}

/// One badge per offered fuel, in display order: ` 91 2.10 `.
pub fn price_badges(station: &Station, selected: Option<FuelType>) -> Line<'static> {
    let mut spans = Vec::new();
    for fuel in FuelType::ALL {
        if !station.offers(fuel) {
            continue;
        }
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(" {} {} ", fuel.short_label(), format_price(station.price_for(fuel))),
            badge_style(fuel, selected == Some(fuel)),
        ));
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            "no prices listed",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Two decimals, or "N/A" when there is no usable price.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => format!("{:.2}", p),
        _ => "N/A".to_string(),
    }
}
