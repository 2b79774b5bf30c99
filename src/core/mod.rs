//! # Core Application Logic
//!
//! This module contains fuelmap's business logic.
//! It knows nothing about any specific UI technology or network client.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  stations  │      │  location  │      │    TUI     │
//!     │  (fetch)   │      │ (position) │      │  (sink)    │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`selector`] / [`ranking`]: price comparison per fuel type
//! - [`focus`]: which station the map highlights
//! - [`view`]: map vs list and what each one is sent
//! - [`presentation`]: requests for the presentation layer

pub mod action;
pub mod config;
pub mod error;
pub mod focus;
pub mod fuel;
pub mod presentation;
pub mod ranking;
pub mod selector;
pub mod state;
pub mod station;
pub mod view;

pub use error::CoreError;
pub use fuel::FuelType;
pub use station::{Position, Station, StationCollection, StationId};
