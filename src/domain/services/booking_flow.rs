use tracing::{info, warn};

use crate::domain::models::booking::BookingSubmission;
use crate::domain::models::provider::CreatedBooking;
use crate::domain::ports::SchedulingProvider;
use crate::domain::services::availability::ensure_slot_available;
use crate::domain::services::booking_builder::{build_booking_request, BookingDefaults};
use crate::domain::services::normalize::{local_to_utc, parse_local_date};
use crate::domain::services::reference::BookingReference;
use crate::error::AppError;

/// Outcome of a successful submission: the provider's record plus the reference we minted.
#[derive(Debug, Clone)]
pub struct ConfirmedBooking {
    pub booking: CreatedBooking,
    pub reference: BookingReference,
}

/// Runs a validated submission through the booking pipeline.
///
/// The pickup is resolved in the fleet timezone. An explicit event type id gates the
/// create call on the provider's open slots; slug/username bookings go straight to create.
/// At most two outbound calls are made, strictly in sequence.
pub async fn submit_booking(
    provider: &dyn SchedulingProvider,
    defaults: &BookingDefaults,
    submission: &BookingSubmission,
) -> Result<ConfirmedBooking, AppError> {
    let tz = defaults.fleet.timezone;
    let start = local_to_utc(&submission.date, &submission.time, tz)?;
    info!(
        "Booking requested for {} {} ({}), resolved to {}",
        submission.date, submission.time, tz, start
    );

    if let Some(event_type_id) = submission.explicit_event_type_id() {
        let local_date = parse_local_date(&submission.date)?;
        ensure_slot_available(provider, event_type_id, local_date, &start).await?;
    }

    let reference = BookingReference::generate();
    let request = build_booking_request(submission, start, &reference, defaults);
    info!(
        "Creating {} booking {} ({} min, {} metadata keys)",
        submission.trip_type,
        reference,
        request.length_in_minutes,
        request.metadata.len()
    );

    let booking = provider.create_booking(&request).await.inspect_err(|e| {
        if let AppError::Rejected { message, .. } = e {
            warn!("Provider rejected booking {}: {}", reference, message);
        }
    })?;

    info!(
        "Booking {} confirmed as {}",
        reference,
        booking.uid.as_deref().unwrap_or("<no uid>")
    );
    Ok(ConfirmedBooking { booking, reference })
}
