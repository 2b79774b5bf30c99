//! # Location
//!
//! Where the device is. Providers may fail or hang; [`locate`] bounds the
//! wait and always comes back with a position, falling back to the
//! configured default.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use crate::core::error::CoreError;
use crate::core::state::PositionFix;
use crate::core::station::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    PermissionDenied,
    Unavailable(String),
    TimedOut(Duration),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "permission to access location was denied"),
            LocationError::Unavailable(msg) => write!(f, "location unavailable: {msg}"),
            LocationError::TimedOut(after) => {
                write!(f, "no location after {}s", after.as_secs_f32())
            }
        }
    }
}

impl std::error::Error for LocationError {}

#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// A position known up front (command line, env, config file).
pub struct FixedPosition(pub Position);

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<Position, LocationError> {
        Ok(self.0)
    }
}

/// Used when no position source is configured.
pub struct NoPosition;

#[async_trait]
impl PositionProvider for NoPosition {
    async fn current_position(&self) -> Result<Position, LocationError> {
        Err(LocationError::Unavailable(
            "no device position configured".to_string(),
        ))
    }
}

/// Asks `provider` for a position, waiting at most `timeout`.
///
/// Any failure becomes a [`CoreError::PermissionDenied`] fallback to `default`.
pub async fn locate(
    provider: &dyn PositionProvider,
    default: Position,
    timeout: Duration,
) -> PositionFix {
    let outcome = match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(Ok(position)) if position.is_valid() => Ok(position),
        Ok(Ok(position)) => Err(LocationError::Unavailable(format!(
            "provider returned invalid position {}",
            position
        ))),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(LocationError::TimedOut(timeout)),
    };

    match outcome {
        Ok(position) => {
            debug!("Located at {}", position);
            PositionFix::located(position)
        }
        Err(e) => {
            warn!("Falling back to default position {}: {}", default, e);
            PositionFix::defaulted(default, CoreError::permission_denied(e.to_string()))
        }
    }
}
