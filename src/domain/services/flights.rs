use crate::domain::models::flight::FlightRecord;

/// Picks the flight a pickup should track: the first active or scheduled one, else the first listed.
pub fn select_relevant_flight(flights: Vec<FlightRecord>) -> Option<FlightRecord> {
    let live = flights.iter().position(FlightRecord::is_live);
    let index = live.unwrap_or(0);
    flights.into_iter().nth(index)
}
