use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::api::dtos::requests::{route_endpoints, RouteMapQuery};
use crate::api::dtos::responses::RouteMapResponse;
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_MAP_SIZE: &str = "400x200";

pub async fn route_map(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteMapQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (origin, destination) = route_endpoints(&query.origin, &query.destination)?;
    let maps = state.maps()?;
    let size = query.size.as_deref().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_MAP_SIZE);

    let overview = maps.directions(origin, destination).await?;
    let static_map_url = maps.static_map_url(size, origin, destination, &overview.encoded_polyline);

    Ok(Json(RouteMapResponse {
        success: true,
        static_map_url,
        encoded_polyline: overview.encoded_polyline,
        bounds: overview.bounds,
    }))
}
