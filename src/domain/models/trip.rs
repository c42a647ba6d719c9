use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Driving distance and time between two addresses as reported by the mapping provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDistance {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub distance_text: String,
    pub duration_text: String,
    pub origin_formatted: Option<String>,
    pub destination_formatted: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverview {
    pub encoded_polyline: String,
    pub bounds: Value,
}

/// Priced distance quote returned to the booking forms.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TripQuote {
    pub total_miles: f64,
    pub duration_minutes: i64,
    pub duration_text: String,
    pub distance_text: String,
    pub price_per_mile: f64,
    pub total_price: f64,
    pub origin_formatted: Option<String>,
    pub destination_formatted: Option<String>,
    pub booking_type: String,
}
