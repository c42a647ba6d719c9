use chrono::{DateTime, Utc};

use crate::config::{Config, FleetConfig};
use crate::domain::models::booking::{format_number, BookingSubmission, TripDetails};
use crate::domain::models::provider::{BookingFieldResponses, NormalizedBookingRequest, ProviderAttendee};
use crate::domain::services::metadata::{flatten_metadata, MetadataValue};
use crate::domain::services::normalize::{format_phone_number, format_usd, nearest_allowed_duration, to_utc_iso};
use crate::domain::services::reference::BookingReference;

/// Process-wide values a booking falls back to or is always stamped with.
#[derive(Clone, Debug)]
pub struct BookingDefaults {
    pub event_type_slug: Option<String>,
    pub username: Option<String>,
    pub fleet: FleetConfig,
}

impl BookingDefaults {
    pub fn from_config(config: &Config) -> Self {
        Self {
            event_type_slug: config.scheduling.default_event_type_slug.clone(),
            username: config.scheduling.default_username.clone(),
            fleet: config.fleet.clone(),
        }
    }
}

/// Assembles the provider payload for a validated submission.
///
/// `start` is the already-resolved UTC pickup instant. The reference is written
/// to both the metadata map and the booking field responses.
pub fn build_booking_request(
    submission: &BookingSubmission,
    start: DateTime<Utc>,
    reference: &BookingReference,
    defaults: &BookingDefaults,
) -> NormalizedBookingRequest {
    let empty = TripDetails::default();
    let trip = submission.trip_details.as_ref().unwrap_or(&empty);

    NormalizedBookingRequest {
        event_type_id: submission.explicit_event_type_id(),
        event_type_slug: non_empty(&submission.event_type_slug).or_else(|| defaults.event_type_slug.clone()),
        username: non_empty(&submission.username).or_else(|| defaults.username.clone()),
        start: to_utc_iso(&start),
        length_in_minutes: nearest_allowed_duration(submission.duration),
        attendee: ProviderAttendee {
            name: submission.attendee.name.clone(),
            email: submission.attendee.email.clone(),
            time_zone: defaults.fleet.timezone.name().to_string(),
            phone_number: format_phone_number(submission.attendee.phone.as_deref()),
            language: defaults.fleet.language.clone(),
        },
        metadata: build_metadata(submission, trip, reference, &defaults.fleet.booking_source),
        booking_fields_responses: build_field_responses(submission, trip, reference),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Reserved keys go first so the reference and channel marker survive the key cap.
fn build_metadata(
    submission: &BookingSubmission,
    trip: &TripDetails,
    reference: &BookingReference,
    source: &str,
) -> std::collections::BTreeMap<String, String> {
    const RESERVED: [&str; 3] = ["tripType", "bookingReference", "source"];

    let mut entries: Vec<(String, MetadataValue)> = vec![
        ("tripType".into(), submission.trip_type.as_str().into()),
        ("bookingReference".into(), reference.as_str().into()),
        ("source".into(), source.into()),
    ];

    if let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(trip) {
        entries.extend(
            fields
                .iter()
                .filter(|(key, _)| !RESERVED.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), MetadataValue::from(value))),
        );
    }

    flatten_metadata(&entries)
}

fn build_field_responses(
    submission: &BookingSubmission,
    trip: &TripDetails,
    reference: &BookingReference,
) -> BookingFieldResponses {
    let duration = match &trip.estimated_duration {
        Some(d) if !d.to_string().is_empty() => d.to_string(),
        _ if submission.duration != 0.0 => format!("{} mins", format_number(submission.duration)),
        _ => String::new(),
    };

    BookingFieldResponses {
        pickup: trip.pickup_address().to_string(),
        destination: trip.dropoff_address().to_string(),
        booking_type: submission.trip_type.as_str().to_string(),
        estimated_distance: format!(
            "{} miles",
            trip.estimated_distance.as_ref().map_or_else(|| "0".to_string(), ToString::to_string)
        ),
        estimated_price: trip.estimated_price.as_ref().map_or_else(|| "0".to_string(), ToString::to_string),
        estimated_total: format_usd(trip.quoted_amount()),
        passengers: trip.passengers.as_ref().map_or_else(|| "1".to_string(), ToString::to_string),
        flight_number: trip.flight_number.clone().unwrap_or_default(),
        duration,
        booking_reference: reference.as_str().to_string(),
    }
}
