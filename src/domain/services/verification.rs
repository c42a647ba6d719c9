use serde_json::Map;
use tracing::{debug, info};

use crate::domain::models::provider::ProviderBookingRecord;
use crate::domain::models::verification::{VerifiedBooking, VerifiedResponses};
use crate::domain::ports::SchedulingProvider;
use crate::domain::services::field_resolution::{resolve_field, FieldSource};
use crate::error::AppError;

/// Reference stored on a provider record: structured responses first, then the
/// legacy booking field responses, then metadata.
pub fn stored_reference(record: &ProviderBookingRecord) -> Option<String> {
    resolve_field(&[
        FieldSource::new(record.responses.as_ref(), "booking_reference"),
        FieldSource::new(record.booking_fields_responses.as_ref(), "booking_reference"),
        FieldSource::new(record.metadata.as_ref(), "bookingReference"),
    ])
}

fn display_field(record: &ProviderBookingRecord, response_key: &str, metadata_key: &str) -> Option<String> {
    resolve_field(&[
        FieldSource::new(record.booking_fields_responses.as_ref(), response_key),
        FieldSource::new(record.responses.as_ref(), response_key),
        FieldSource::new(record.metadata.as_ref(), metadata_key),
    ])
}

/// Projects a provider record for display. Per field, booking field responses win
/// over structured responses, which win over metadata.
pub fn project_booking(record: &ProviderBookingRecord, requested_reference: &str) -> VerifiedBooking {
    let field = |response_key: &str, metadata_key: &str| display_field(record, response_key, metadata_key);

    let mut responses = VerifiedResponses {
        pickup: field("pickup", "pickupLocation"),
        destination: field("destination", "dropoffLocation"),
        booking_type: field("booking_type", "tripType"),
        estimated_distance: field("estimated_distance", "estimatedDistance"),
        estimated_price: field("estimated_price", "estimatedPrice"),
        estimated_total: field("estimated_total", "estimatedTotal"),
        passengers: field("passengers", "passengers"),
        flight_number: field("flight_number", "flightNumber"),
        duration: field("duration", "estimatedDuration"),
        booking_reference: field("booking_reference", "bookingReference"),
        notes: None,
    };

    responses.notes = resolve_field(&[
        FieldSource::new(record.booking_fields_responses.as_ref(), "notes"),
        FieldSource::new(record.responses.as_ref(), "notes"),
    ])
    .or_else(|| record.notes.clone().filter(|n| !n.is_empty()));

    let reference = responses
        .booking_reference
        .clone()
        .unwrap_or_else(|| requested_reference.to_string());

    VerifiedBooking {
        uid: record.uid.clone(),
        reference,
        status: record.status.clone(),
        title: record.title.clone(),
        start: record.start.clone(),
        end: record.end.clone(),
        attendees: record.attendees.clone(),
        responses,
        metadata: record.metadata.clone().unwrap_or_else(Map::new),
        meeting_url: record.meeting_url.clone(),
        location: record.location.clone(),
    }
}

/// Finds the booking carrying `reference` among the bookings of `email`.
pub async fn verify_booking(
    provider: &dyn SchedulingProvider,
    reference: &str,
    email: &str,
) -> Result<VerifiedBooking, AppError> {
    let bookings = provider.list_bookings_by_email(email).await?;
    debug!("Scanning {} bookings for reference {}", bookings.len(), reference);

    let record = bookings
        .iter()
        .find(|b| stored_reference(b).as_deref() == Some(reference))
        .ok_or_else(|| {
            AppError::NotFound("Booking not found. Please check your booking reference and email.".into())
        })?;

    info!("Verified booking {} for reference {}", record.uid.as_deref().unwrap_or("?"), reference);
    Ok(project_booking(record, reference))
}
