//! Transit API Gateway
//!
//! This module defines the contract for fetching live prediction and incident
//! data from the transit system's API, the reqwest-backed client that talks
//! to the real thing, and a mock implementation for tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Station arrivals endpoint; the station code is appended as a path segment.
const ARRIVALS_ENDPOINT: &str = "StationPrediction.svc/json/GetPrediction";
/// System-wide service advisories endpoint.
const INCIDENTS_ENDPOINT: &str = "Incidents.svc/json/Incidents";

/// Failures talking to the transit API.
///
/// Both variants are terminal for the turn that triggered them: the caller
/// answers with a fixed spoken error and never retries.
#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("transit API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("transit API returned status {0}")]
    Status(StatusCode),
}

/// One predicted train at a station, as the upstream API reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainRecord {
    #[serde(rename = "DestinationName")]
    pub destination_name: String,
    /// Minutes until arrival, or a sentinel like "BRD" or "ARR".
    #[serde(rename = "Min")]
    pub min: String,
}

/// Body of the station-arrivals endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrivalsPayload {
    #[serde(rename = "Trains", default)]
    pub trains: Vec<TrainRecord>,
}

/// One service incident.
#[derive(Debug, Clone, Deserialize)]
pub struct Incident {
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

/// Body of the service-advisories endpoint.
///
/// `incidents` stays an `Option`: an absent list violates the upstream
/// contract and must be reported differently from a present-but-empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentsPayload {
    #[serde(rename = "Incidents")]
    pub incidents: Option<Vec<Incident>>,
}

/// Defines the contract for fetching live transit data.
///
/// This abstraction lets the dispatcher be exercised against a mock without
/// a network, while the service binary wires in the real client.
#[async_trait]
pub trait TransitApi: Send + Sync {
    /// Fetches train predictions for one station code.
    async fn station_arrivals(&self, station_code: &str) -> Result<ArrivalsPayload, TransitError>;

    /// Fetches the system-wide incident list.
    async fn service_incidents(&self) -> Result<IncidentsPayload, TransitError>;
}

/// Client for the real transit API.
///
/// Issues one GET per call with the API key attached as a query parameter.
/// The client-wide timeout bounds the whole exchange so a slow upstream
/// cannot eat the voice platform's round-trip budget.
pub struct WmataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WmataClient {
    /// Creates a client for the given API base URL and key.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, TransitError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T, TransitError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "Requesting transit API");

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TransitError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TransitApi for WmataClient {
    async fn station_arrivals(&self, station_code: &str) -> Result<ArrivalsPayload, TransitError> {
        self.fetch(&format!("{}/{}", ARRIVALS_ENDPOINT, station_code))
            .await
    }

    async fn service_incidents(&self) -> Result<IncidentsPayload, TransitError> {
        self.fetch(INCIDENTS_ENDPOINT).await
    }
}

/// A mock `TransitApi` for development and tests.
///
/// Serves fixed payloads without touching the network. A mock constructed
/// with `unavailable()` fails every call the way an upstream outage would.
#[derive(Default)]
pub struct MockTransitApi {
    arrivals: Option<ArrivalsPayload>,
    incidents: Option<IncidentsPayload>,
}

impl MockTransitApi {
    /// A mock whose every call fails like an upstream outage.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Serves the given train list from `station_arrivals`.
    pub fn with_arrivals(mut self, trains: Vec<TrainRecord>) -> Self {
        self.arrivals = Some(ArrivalsPayload { trains });
        self
    }

    /// Serves the given incident list (or a contract-violating absent list)
    /// from `service_incidents`.
    pub fn with_incidents(mut self, incidents: Option<Vec<Incident>>) -> Self {
        self.incidents = Some(IncidentsPayload { incidents });
        self
    }
}

#[async_trait]
impl TransitApi for MockTransitApi {
    async fn station_arrivals(&self, _station_code: &str) -> Result<ArrivalsPayload, TransitError> {
        self.arrivals
            .clone()
            .ok_or(TransitError::Status(StatusCode::SERVICE_UNAVAILABLE))
    }

    async fn service_incidents(&self) -> Result<IncidentsPayload, TransitError> {
        self.incidents
            .clone()
            .ok_or(TransitError::Status(StatusCode::SERVICE_UNAVAILABLE))
    }
}
