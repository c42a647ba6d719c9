use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::ports::{FlightStatusService, MapsService, SchedulingProvider};
use crate::infra::{
    flights::aviationstack_service::AviationstackService,
    maps::google_maps_service::GoogleMapsService,
    scheduling::cal_com_client::CalComClient,
};
use crate::state::AppState;

/// Wires the outbound adapters. An adapter whose key is not configured is left out
/// and the routes that need it answer with a configuration error.
pub fn bootstrap_state(config: &Config) -> AppState {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new());

    let scheduling: Option<Arc<dyn SchedulingProvider>> = config.scheduling.api_key.clone().map(|key| {
        info!("Scheduling provider configured at {}", config.scheduling.api_base);
        Arc::new(CalComClient::new(client.clone(), &config.scheduling, key, config.fleet.timezone)) as Arc<dyn SchedulingProvider>
    });
    if scheduling.is_none() {
        warn!("CAL_API_KEY is not set; booking routes will answer 500");
    }

    let maps: Option<Arc<dyn MapsService>> = config
        .maps
        .api_key
        .clone()
        .map(|key| Arc::new(GoogleMapsService::new(client.clone(), &config.maps, key)) as Arc<dyn MapsService>);
    if maps.is_none() {
        warn!("GOOGLE_MAPS_API_KEY is not set; distance and route map routes will answer 500");
    }

    let flights: Option<Arc<dyn FlightStatusService>> = config
        .flights
        .api_key
        .clone()
        .map(|key| Arc::new(AviationstackService::new(client.clone(), &config.flights, key)) as Arc<dyn FlightStatusService>);
    if flights.is_none() {
        warn!("AVIATIONSTACK_API_KEY is not set; flight route will answer 500");
    }

    AppState {
        config: config.clone(),
        scheduling,
        maps,
        flights,
    }
}
