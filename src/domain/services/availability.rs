use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::models::provider::AvailabilityResult;
use crate::domain::ports::SchedulingProvider;
use crate::error::AppError;

/// Open slots for an event type between two calendar dates.
pub async fn fetch_availability(
    provider: &dyn SchedulingProvider,
    event_type_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<AvailabilityResult, AppError> {
    let slots = provider.list_slots(event_type_id, start, end).await?;
    Ok(AvailabilityResult::from_slots(slots))
}

/// True when one of the provider's slot strings denotes exactly `instant` (millisecond precision).
pub fn contains_instant(slots: &[String], instant: &DateTime<Utc>) -> bool {
    let wanted = instant.timestamp_millis();
    slots.iter().any(|slot| {
        DateTime::parse_from_rfc3339(slot)
            .map(|dt| dt.timestamp_millis() == wanted)
            .unwrap_or(false)
    })
}

/// Gate for bookings that name an explicit event type: the requested pickup must be one of
/// the provider's open slots on the local pickup date or the day after.
///
/// A provider that cannot be reached surfaces as [`AppError::ProviderUnavailable`]; a provider
/// that answers without slots is treated as fully booked.
pub async fn ensure_slot_available(
    provider: &dyn SchedulingProvider,
    event_type_id: u64,
    local_date: NaiveDate,
    requested: &DateTime<Utc>,
) -> Result<(), AppError> {
    let window_end = local_date.checked_add_days(Days::new(1)).unwrap_or(local_date);

    let availability = fetch_availability(provider, event_type_id, local_date, window_end)
        .await
        .map_err(|e| match e {
            AppError::InternalWithMsg(msg) => AppError::ProviderUnavailable(msg),
            other => other,
        })?;

    if contains_instant(&availability.slots, requested) {
        info!("Slot {} available for event type {}", requested, event_type_id);
        return Ok(());
    }

    warn!(
        "Slot {} not available for event type {} ({} open slots in window)",
        requested,
        event_type_id,
        availability.slots.len()
    );
    Err(AppError::SlotConflict { available_slots: availability.slots })
}
