use std::fmt;

use async_trait::async_trait;

use super::types::RawStation;
use crate::core::station::Position;

/// Errors that can occur while talking to a station data source.
#[derive(Debug)]
pub enum SourceError {
    /// Source misconfigured (bad URL, client could not be built).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not a station list.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(msg) => write!(f, "config error: {msg}"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Anything that can list the stations around a position.
#[async_trait]
pub trait StationSource: Send + Sync {
    /// Returns the name of the source, for logs.
    fn name(&self) -> &str;

    async fn fetch(&self, position: Position) -> Result<Vec<RawStation>, SourceError>;
}
