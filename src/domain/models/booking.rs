use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

fn default_duration() -> f64 {
    60.0
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[default]
    Airport,
    City,
    Hourly,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::Airport => "airport",
            TripType::City => "city",
            TripType::Hourly => "hourly",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "airport" => Ok(TripType::Airport),
            "city" => Ok(TripType::City),
            "hourly" => Ok(TripType::Hourly),
            other => Err(format!("Unknown trip type: {}", other)),
        }
    }
}

/// A trip estimate the booking forms send either as text ("12.4") or as a bare number.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum LooseScalar {
    Number(serde_json::Number),
    Text(String),
}

impl LooseScalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseScalar::Number(n) => n.as_f64(),
            LooseScalar::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for LooseScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseScalar::Number(n) => match n.as_f64() {
                Some(v) if !(n.is_i64() || n.is_u64()) => f.write_str(&format_number(v)),
                _ => write!(f, "{}", n),
            },
            LooseScalar::Text(s) => f.write_str(s),
        }
    }
}

/// Renders a number the way riders see it on the forms: integral values without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[serde(default)]
    #[validate(length(min = 1, message = "Attendee name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub time_zone: Option<String>,
    pub language: Option<String>,
}

/// Trip data collected by the airport, city and hourly forms.
///
/// The known fields are typed; anything else the forms add lands in `extra`
/// in submission order so new form fields never break validation.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_distance: Option<LooseScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<LooseScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total: Option<LooseScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<LooseScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers: Option<LooseScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TripDetails {
    /// Pickup address, preferring `pickupLocation` over the short `pickup` alias.
    pub fn pickup_address(&self) -> &str {
        first_non_empty(&[&self.pickup_location, &self.pickup])
    }

    /// Dropoff address, preferring `dropoffLocation` over `destination`.
    pub fn dropoff_address(&self) -> &str {
        first_non_empty(&[&self.dropoff_location, &self.destination])
    }

    /// Quoted amount in dollars: `estimatedPrice`, then `estimatedTotal`, then zero.
    pub fn quoted_amount(&self) -> f64 {
        self.estimated_price
            .as_ref()
            .or(self.estimated_total.as_ref())
            .and_then(LooseScalar::as_f64)
            .unwrap_or(0.0)
    }
}

fn first_non_empty<'a>(candidates: &[&'a Option<String>]) -> &'a str {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

/// Untrusted booking submission as posted by the website forms.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub event_type_id: Option<u64>,
    pub event_type_slug: Option<String>,
    pub username: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,
    #[serde(default = "default_duration")]
    pub duration: f64,

    #[validate(nested)]
    pub attendee: Attendee,

    pub notes: Option<String>,
    #[serde(default)]
    pub trip_type: TripType,
    pub trip_details: Option<TripDetails>,
}

impl BookingSubmission {
    /// Event type id the rider named, with `0` read as "none given".
    pub fn explicit_event_type_id(&self) -> Option<u64> {
        self.event_type_id.filter(|id| *id != 0)
    }
}
