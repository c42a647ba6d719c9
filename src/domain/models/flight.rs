use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One flight as returned by the flight-status provider, kept verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct FlightRecord(pub Map<String, Value>);

impl FlightRecord {
    pub fn status(&self) -> Option<&str> {
        self.0.get("flight_status").and_then(Value::as_str)
    }

    /// Active or scheduled flights are the ones a pickup can still be planned around.
    pub fn is_live(&self) -> bool {
        matches!(self.status(), Some("active") | Some("scheduled"))
    }
}
