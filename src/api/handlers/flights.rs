use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::api::dtos::requests::FlightQuery;
use crate::domain::services::flights::select_relevant_flight;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the provider's record for the most relevant matching flight, untouched.
pub async fn flight_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FlightQuery>,
) -> Result<impl IntoResponse, AppError> {
    let flight_iata = query.required()?;
    let flights = state.flights()?;

    let candidates = flights.lookup(flight_iata).await?;
    info!("flight_status: {} candidates for {}", candidates.len(), flight_iata);

    let flight = select_relevant_flight(candidates).ok_or_else(|| AppError::NotFound("Flight not found".into()))?;
    Ok(Json(flight))
}
