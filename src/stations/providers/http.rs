//! HTTP station source for the gas-stations REST endpoint.
//!
//! `GET {base_url}?latitude=..&longitude=..&radius=..` answers with either a
//! JSON array of station records or an object wrapping one.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::core::station::Position;
use crate::stations::source::{SourceError, StationSource};
use crate::stations::types::{RawStation, StationsPayload};

pub struct HttpStationSource {
    base_url: String,
    radius_m: u32,
    client: reqwest::Client,
}

impl HttpStationSource {
    /// Creates a new HTTP source.
    ///
    /// # Arguments
    /// * `base_url` - Full endpoint URL, e.g. `http://host:5002/api/v1/gas-stations`
    /// * `radius_m` - Search radius sent with every request
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: String, radius_m: u32, timeout: Duration) -> Result<Self, SourceError> {
        if base_url.trim().is_empty() {
            return Err(SourceError::Config("station API URL is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Config(e.to_string()))?;

        Ok(Self {
            base_url,
            radius_m,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl StationSource for HttpStationSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, position: Position) -> Result<Vec<RawStation>, SourceError> {
        info!("GET {} near {}", self.base_url, position);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", position.latitude.to_string()),
                ("longitude", position.longitude.to_string()),
                ("radius", self.radius_m.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Network(format!("request timed out: {e}"))
                } else {
                    SourceError::Network(e.to_string())
                }
            })?;

        debug!("Station API response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Station API error: {} - {}", status, err_body);
            return Err(SourceError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let payload: StationsPayload = serde_json::from_str(&body)
            .map_err(|e| SourceError::Parse(format!("unexpected station payload: {e}")))?;
        let stations = payload.into_stations();
        debug!("Station API returned {} records", stations.len());
        Ok(stations)
    }
}
