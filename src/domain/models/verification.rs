use serde::Serialize;
use serde_json::{Map, Value};

/// Trip answers reconstructed for the verification page.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct VerifiedResponses {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_reference: Option<String>,
}

/// Read-only projection of a provider booking, computed fresh per lookup.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedBooking {
    pub uid: Option<String>,
    pub reference: String,
    pub status: Option<String>,
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub attendees: Vec<Value>,
    pub responses: VerifiedResponses,
    pub metadata: Map<String, Value>,
    pub meeting_url: Option<String>,
    pub location: Option<Value>,
}
