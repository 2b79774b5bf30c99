//! # FuelBar Component
//!
//! One button per fuel type, always in the same order, with the key that
//! selects it. The selected fuel is highlighted.
//!
//! ```text
//!  1 Unleaded 91   2 Unleaded 95   3 Unleaded 98   4 Diesel   0 none
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::fuel::FuelType;
use crate::tui::component::Component;
use crate::tui::style::{SELECTED, badge_style};

pub struct FuelBar {
    pub selected: Option<FuelType>,
}

impl FuelBar {
    pub fn new(selected: Option<FuelType>) -> Self {
        Self { selected }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, fuel) in FuelType::ALL.iter().enumerate() {
            spans.push(Span::styled(
                format!(" {} {} ", i + 1, fuel.label()),
                badge_style(*fuel, self.selected == Some(*fuel)),
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            " 0 none ",
            if self.selected.is_none() {
                Style::default().fg(Color::White).bg(SELECTED)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ));
        spans
    }
}

impl Component for FuelBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Line::from(self.spans()), area);
    }
}
