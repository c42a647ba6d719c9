use serde::Deserialize;

use crate::error::AppError;

/// Treats absent and blank query values alike.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub event_type_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl AvailabilityQuery {
    pub fn required(&self) -> Result<(&str, &str, &str), AppError> {
        match (present(&self.event_type_id), present(&self.start), present(&self.end)) {
            (Some(id), Some(start), Some(end)) => Ok((id, start, end)),
            _ => Err(AppError::Validation("Missing required params: eventTypeId, start, end".into())),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct VerifyQuery {
    pub reference: Option<String>,
    pub email: Option<String>,
}

impl VerifyQuery {
    pub fn required(&self) -> Result<(&str, &str), AppError> {
        match (present(&self.reference), present(&self.email)) {
            (Some(reference), Some(email)) => Ok((reference, email)),
            _ => Err(AppError::Validation("Booking reference and email are required".into())),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct DistanceQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(rename = "type")]
    pub trip_type: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct RouteMapQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub size: Option<String>,
}

/// Both trip endpoints need an origin and a destination.
pub fn route_endpoints<'a>(origin: &'a Option<String>, destination: &'a Option<String>) -> Result<(&'a str, &'a str), AppError> {
    match (present(origin), present(destination)) {
        (Some(origin), Some(destination)) => Ok((origin, destination)),
        _ => Err(AppError::Validation("Origin and destination are required".into())),
    }
}

#[derive(Deserialize, Default)]
pub struct FlightQuery {
    pub flight_iata: Option<String>,
}

impl FlightQuery {
    pub fn required(&self) -> Result<&str, AppError> {
        present(&self.flight_iata).ok_or_else(|| AppError::Validation("Flight IATA code is required".into()))
    }
}
