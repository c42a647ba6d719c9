use crate::domain::models::{
    flight::FlightRecord,
    provider::{CreatedBooking, NormalizedBookingRequest, ProviderBookingRecord},
    trip::{RouteDistance, RouteOverview},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait SchedulingProvider: Send + Sync {
    /// Start instants open for `event_type_id` between two calendar dates, flattened across days.
    /// A non-success envelope yields an empty list; only transport failures are errors.
    async fn list_slots(&self, event_type_id: u64, start: NaiveDate, end: NaiveDate) -> Result<Vec<String>, AppError>;
    async fn create_booking(&self, request: &NormalizedBookingRequest) -> Result<CreatedBooking, AppError>;
    async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<ProviderBookingRecord>, AppError>;
}

#[async_trait]
pub trait MapsService: Send + Sync {
    async fn distance(&self, origin: &str, destination: &str) -> Result<RouteDistance, AppError>;
    async fn directions(&self, origin: &str, destination: &str) -> Result<RouteOverview, AppError>;
    fn static_map_url(&self, size: &str, origin: &str, destination: &str, encoded_polyline: &str) -> String;
}

#[async_trait]
pub trait FlightStatusService: Send + Sync {
    async fn lookup(&self, flight_iata: &str) -> Result<Vec<FlightRecord>, AppError>;
}
