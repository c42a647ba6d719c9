use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, instrument, warn};

use crate::config::FlightsConfig;
use crate::domain::models::flight::FlightRecord;
use crate::domain::ports::FlightStatusService;
use crate::error::AppError;

pub struct AviationstackService {
    client: Client,
    api_base: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ProviderError {
    info: Option<String>,
    code: Option<String>,
}

#[derive(Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    data: Vec<FlightRecord>,
    error: Option<ProviderError>,
}

impl AviationstackService {
    pub fn new(client: Client, config: &FlightsConfig, api_key: String) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl FlightStatusService for AviationstackService {
    #[instrument(skip(self))]
    async fn lookup(&self, flight_iata: &str) -> Result<Vec<FlightRecord>, AppError> {
        let res = self
            .client
            .get(format!("{}/flights", self.api_base))
            .query(&[("access_key", self.api_key.as_str()), ("flight_iata", flight_iata)])
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Flight status connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        let status = res.status();
        let body: FlightsResponse = res.json().await.map_err(|e| {
            let msg = format!("Flight status returned an unexpected body. Status: {}, Error: {}", status, e);
            error!("{}", msg);
            AppError::InternalWithMsg(msg)
        })?;

        if let Some(err) = body.error {
            let message = err
                .info
                .or(err.code)
                .unwrap_or_else(|| "Flight lookup failed".to_string());
            warn!("Flight status provider refused lookup: {}", message);
            return Err(AppError::rejected(message));
        }

        Ok(body.data)
    }
}
