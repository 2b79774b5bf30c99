use crate::core::state::App;
use crate::core::view::ViewMode;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{FuelBar, RankedList, StationMap, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HELP_TEXT: &str = "1-4 fuel  0 none  Tab view  m map  l list  r refresh  ↑↓ scroll  x dismiss  q quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let advisory_height = if app.advisory.is_some() { 1 } else { 0 };
    let layout = Layout::vertical([
        Length(1),
        Length(1),
        Min(0),
        Length(advisory_height),
        Length(1),
    ]);
    let [title_area, fuel_area, main_area, advisory_area, help_area] =
        layout.areas(frame.area());

    TitleBar::new(
        app.fuel,
        app.mode(),
        app.stations.fetched_at(),
        app.status_message.clone(),
        app.is_loading,
    )
    .render(frame, title_area);

    FuelBar::new(app.fuel).render(frame, fuel_area);

    match app.mode() {
        ViewMode::Spatial => {
            let user = app.position.as_ref().map(|fix| fix.position);
            StationMap::new(tui.pins.stations(), &tui.map, user, app.fuel).render(frame, main_area);
        }
        ViewMode::Ranked => {
            RankedList::new(&tui.ranked, tui.ranked_fuel, &mut tui.ranked_list)
                .render(frame, main_area);
        }
    }

    if let Some(advisory) = &app.advisory {
        draw_advisory(frame, advisory_area, advisory);
    }

    frame.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn draw_advisory(frame: &mut Frame, area: Rect, advisory: &str) {
    let line = Line::from(vec![
        Span::styled("⚠ ", Style::default().fg(Color::Yellow)),
        Span::styled(advisory.to_string(), Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(line, area);
}
