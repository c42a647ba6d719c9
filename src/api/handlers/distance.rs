use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::api::dtos::requests::{route_endpoints, DistanceQuery};
use crate::api::dtos::responses::DistanceResponse;
use crate::domain::models::booking::TripType;
use crate::domain::services::pricing::quote_trip;
use crate::error::AppError;
use crate::state::AppState;

pub async fn quote_distance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DistanceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (origin, destination) = route_endpoints(&query.origin, &query.destination)?;
    let maps = state.maps()?;

    let trip_type = query
        .trip_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(TripType::default().as_str());

    let route = maps.distance(origin, destination).await?;
    let quote = quote_trip(&route, trip_type, &state.config.pricing);
    info!(
        "quote_distance: {} mi at {}/mi = {} ({})",
        quote.total_miles, quote.price_per_mile, quote.total_price, trip_type
    );

    Ok(Json(DistanceResponse { success: true, quote }))
}
