use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// `{status, data | error}` wrapper every scheduling provider response uses.
///
/// Only `status` decides success. `data` and `error` stay untyped until the caller knows
/// which one it needs, so an error body of any shape still reads as a failed envelope.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProviderEnvelope {
    pub status: String,
    pub data: Option<Value>,
    pub error: Option<Value>,
}

impl ProviderEnvelope {
    /// Reads an envelope out of any JSON body. Anything that is not an object is a failed envelope.
    pub fn from_value(body: Value) -> Self {
        let Value::Object(mut fields) = body else {
            return Self::default();
        };
        let status = match fields.remove("status") {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        Self {
            status,
            data: fields.remove("data").filter(|d| !d.is_null()),
            error: fields.remove("error").filter(|e| !e.is_null()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Provider's own error message: a bare string error, or a string `error.message`.
    pub fn error_message(&self) -> Option<&str> {
        let message = match self.error.as_ref()? {
            Value::String(s) => s.as_str(),
            Value::Object(o) => o.get("message")?.as_str()?,
            _ => return None,
        };
        Some(message).filter(|m| !m.trim().is_empty())
    }

    /// Decodes `data` into `T`. A missing `data` is `Ok(None)`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<Option<T>, serde_json::Error> {
        self.data.map(serde_json::from_value).transpose()
    }
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAttendee {
    pub name: String,
    pub email: String,
    pub time_zone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub language: String,
}

/// Named booking questions stored alongside the reservation. All values are plain strings.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct BookingFieldResponses {
    pub pickup: String,
    pub destination: String,
    pub booking_type: String,
    pub estimated_distance: String,
    pub estimated_price: String,
    pub estimated_total: String,
    pub passengers: String,
    pub flight_number: String,
    pub duration: String,
    pub booking_reference: String,
}

/// Exact body sent to the provider's booking creation endpoint.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub start: String,
    pub length_in_minutes: u32,
    pub attendee: ProviderAttendee,
    pub metadata: BTreeMap<String, String>,
    pub booking_fields_responses: BookingFieldResponses,
}

/// Record the provider returns after a successful create.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CreatedBooking {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A booking as listed by the provider for one attendee email.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderBookingRecord {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendees: Vec<Value>,
    #[serde(default)]
    pub responses: Option<Map<String, Value>>,
    #[serde(default)]
    pub booking_fields_responses: Option<Map<String, Value>>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub meeting_url: Option<String>,
    #[serde(default)]
    pub location: Option<Value>,
}

/// Open slots for one event type over a date window.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct AvailabilityResult {
    pub available: bool,
    pub slots: Vec<String>,
}

impl AvailabilityResult {
    pub fn from_slots(slots: Vec<String>) -> Self {
        Self { available: !slots.is_empty(), slots }
    }
}
