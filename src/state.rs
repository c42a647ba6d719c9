use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{FlightStatusService, MapsService, SchedulingProvider};
use crate::domain::services::booking_builder::BookingDefaults;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub scheduling: Option<Arc<dyn SchedulingProvider>>,
    pub maps: Option<Arc<dyn MapsService>>,
    pub flights: Option<Arc<dyn FlightStatusService>>,
}

impl AppState {
    pub fn scheduling(&self) -> Result<Arc<dyn SchedulingProvider>, AppError> {
        self.scheduling
            .clone()
            .ok_or_else(|| AppError::Configuration("Cal.com API key is not configured".into()))
    }

    pub fn maps(&self) -> Result<Arc<dyn MapsService>, AppError> {
        self.maps
            .clone()
            .ok_or_else(|| AppError::Configuration("Google Maps API key is missing".into()))
    }

    pub fn flights(&self) -> Result<Arc<dyn FlightStatusService>, AppError> {
        self.flights
            .clone()
            .ok_or_else(|| AppError::Configuration("AviationStack API key is missing".into()))
    }

    pub fn booking_defaults(&self) -> BookingDefaults {
        BookingDefaults::from_config(&self.config)
    }
}
