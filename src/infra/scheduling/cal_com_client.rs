use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::config::SchedulingConfig;
use crate::domain::models::provider::{
    CreatedBooking, NormalizedBookingRequest, ProviderBookingRecord, ProviderEnvelope,
};
use crate::domain::ports::SchedulingProvider;
use crate::error::AppError;

const BOOKING_STATUSES: &str = "upcoming,past,cancelled";

/// Cal.com v2 REST client.
pub struct CalComClient {
    client: Client,
    api_base: String,
    api_key: String,
    api_version: String,
    timezone: Tz,
}

impl CalComClient {
    pub fn new(client: Client, config: &SchedulingConfig, api_key: String, timezone: Tz) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            api_version: config.api_version.clone(),
            timezone,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("cal-api-version", &self.api_version)
            .header("Content-Type", "application/json")
    }

    /// Sends an already authorized request and reads the `{status, data|error}` envelope, whatever the HTTP status.
    /// Only a body that is not JSON at all is an error here.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<ProviderEnvelope, AppError> {
        let res = request.send().await.map_err(|e| {
            let msg = format!("Cal.com connection error during {}: {}", what, e);
            error!("{}", msg);
            AppError::InternalWithMsg(msg)
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| {
            let msg = format!("Cal.com {} response could not be read: {}", what, e);
            error!("{}", msg);
            AppError::InternalWithMsg(msg)
        })?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            let msg = format!("Cal.com {} returned an unreadable body. Status: {}, Error: {}", what, status, e);
            error!("{} Body: {}", msg, text);
            AppError::InternalWithMsg(msg)
        })?;

        let envelope = ProviderEnvelope::from_value(body);
        if !envelope.is_success() {
            debug!("Cal.com {} answered {} with status {:?}", what, status, envelope.status);
        }
        Ok(envelope)
    }
}

/// Flattens the per-day slot map into one list of instants, keeping provider order.
///
/// Accepts `{slots: {day: [...]}}` as well as a bare `{day: [...]}` map; entries may be
/// plain strings or objects carrying `start` or `time`.
pub fn flatten_slots(data: &Value) -> Vec<String> {
    let days = match data.get("slots") {
        Some(Value::Object(days)) => days,
        _ => match data {
            Value::Object(days) => days,
            _ => return Vec::new(),
        },
    };

    days.values()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|slot| match slot {
            Value::String(s) => Some(s.clone()),
            Value::Object(o) => o.get("start").or_else(|| o.get("time")).and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect()
}

/// Booking records from a list payload (bare array or `{bookings: [...]}`).
/// Records that cannot be read are skipped so one odd booking never hides the rest.
fn booking_list(data: Value) -> Vec<ProviderBookingRecord> {
    let items = match data {
        Value::Array(items) => items,
        Value::Object(mut o) => match o.remove("bookings") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ProviderBookingRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping unreadable Cal.com booking record: {}", e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl SchedulingProvider for CalComClient {
    #[instrument(skip(self))]
    async fn list_slots(&self, event_type_id: u64, start: NaiveDate, end: NaiveDate) -> Result<Vec<String>, AppError> {
        let request = self.authorized(self.client.get(self.url("/slots"))).query(&[
            ("eventTypeId", event_type_id.to_string()),
            ("start", start.format("%Y-%m-%d").to_string()),
            ("end", end.format("%Y-%m-%d").to_string()),
            ("timeZone", self.timezone.name().to_string()),
        ]);

        let envelope = self.send(request, "slot listing").await?;
        if !envelope.is_success() {
            warn!(
                "Cal.com slot listing not successful ({}), treating as no availability",
                envelope.error_message().unwrap_or(&envelope.status)
            );
            return Ok(Vec::new());
        }

        let slots = envelope.data.as_ref().map(flatten_slots).unwrap_or_default();
        debug!("Cal.com returned {} slots", slots.len());
        Ok(slots)
    }

    #[instrument(skip(self, request), fields(start = %request.start))]
    async fn create_booking(&self, request: &NormalizedBookingRequest) -> Result<CreatedBooking, AppError> {
        let envelope = self.send(self.authorized(self.client.post(self.url("/bookings"))).json(request), "booking creation").await?;

        if !envelope.is_success() {
            let message = envelope.error_message().unwrap_or("Failed to create booking").to_string();
            return Err(AppError::rejected(message));
        }

        let booking = envelope.into_data::<CreatedBooking>().map_err(|e| {
            let msg = format!("Cal.com created booking has an unexpected shape: {}", e);
            error!("{}", msg);
            AppError::InternalWithMsg(msg)
        })?;
        Ok(booking.unwrap_or_default())
    }

    #[instrument(skip(self, email))]
    async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<ProviderBookingRecord>, AppError> {
        let request = self
            .authorized(self.client.get(self.url("/bookings")))
            .query(&[("status", BOOKING_STATUSES), ("attendeeEmail", email)]);

        let envelope = self.send(request, "booking listing").await?;
        if !envelope.is_success() {
            return Err(AppError::NotFound("No bookings found for this email".into()));
        }

        Ok(envelope.data.map(booking_list).unwrap_or_default())
    }
}
