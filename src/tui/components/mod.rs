//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: app name, fuel, view, snapshot time and status
//! - `FuelBar`: one button per fuel type, selected one highlighted
//! - `StationMap`: canvas of pins, user marker and detail callout
//!
//! ### Stateful Components
//!
//! - `RankedList`: scrollable fuel cards; scroll offset lives in
//!   `RankedListState`, which `TuiState` keeps between frames
//!
//! Components never read `App` directly. `ui.rs` picks the props out of
//! `App` and `TuiState` and hands them over.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── fuel_bar.rs      (Fuel selector)
//! ├── station_map.rs   (Spatial view)
//! └── ranked_list.rs   (Ranked view)
//! ```

pub mod fuel_bar;
pub mod ranked_list;
pub mod station_map;
pub mod title_bar;

pub use fuel_bar::FuelBar;
pub use ranked_list::{RankedList, RankedListState};
pub use station_map::{MapView, StationMap};
pub use title_bar::TitleBar;
