use serde::Serialize;
use serde_json::Value;

use crate::domain::models::trip::TripQuote;
use crate::domain::models::verification::VerifiedBooking;
use crate::domain::services::booking_flow::ConfirmedBooking;

#[derive(Serialize)]
pub struct BookingSummary {
    pub id: Option<Value>,
    pub uid: Option<String>,
    pub reference: String,
    pub status: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub title: Option<String>,
}

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub success: bool,
    pub booking: BookingSummary,
    pub message: &'static str,
}

impl From<ConfirmedBooking> for BookingCreatedResponse {
    fn from(confirmed: ConfirmedBooking) -> Self {
        let ConfirmedBooking { booking, reference } = confirmed;
        Self {
            success: true,
            booking: BookingSummary {
                id: booking.id,
                uid: booking.uid,
                reference: reference.as_str().to_string(),
                status: booking.status,
                start: booking.start,
                end: booking.end,
                title: booking.title,
            },
            message: "Booking confirmed successfully",
        }
    }
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub success: bool,
    pub available: bool,
    pub slots: Vec<String>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub booking: VerifiedBooking,
}

#[derive(Serialize)]
pub struct DistanceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub quote: TripQuote,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMapResponse {
    pub success: bool,
    pub static_map_url: String,
    pub encoded_polyline: String,
    pub bounds: Value,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
