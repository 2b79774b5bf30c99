//! One fetch round: locate, then load, then report back as an action.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use super::repository::StationRepository;
use crate::core::action::Action;
use crate::core::state::FetchToken;
use crate::core::station::Position;
use crate::location::{PositionProvider, locate};

#[derive(Clone)]
pub struct FetchPipeline {
    positions: Arc<dyn PositionProvider>,
    repository: StationRepository,
    default_position: Position,
    location_timeout: Duration,
}

impl FetchPipeline {
    pub fn new(
        positions: Arc<dyn PositionProvider>,
        repository: StationRepository,
        default_position: Position,
        location_timeout: Duration,
    ) -> Self {
        Self {
            positions,
            repository,
            default_position,
            location_timeout,
        }
    }

    /// Runs the fetch identified by `token`. Never fails: errors travel
    /// inside the returned `Action::FetchCompleted`.
    pub async fn run(&self, token: FetchToken) -> Action {
        let position = locate(
            self.positions.as_ref(),
            self.default_position,
            self.location_timeout,
        )
        .await;
        let result = self.repository.load(position.position).await;
        debug!(
            "Fetch {} finished ({})",
            token.value(),
            if result.is_ok() { "ok" } else { "failed" }
        );
        Action::FetchCompleted {
            token,
            position,
            result,
        }
    }
}
