use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::api::dtos::requests::VerifyQuery;
use crate::api::dtos::responses::VerifyResponse;
use crate::domain::services::verification::verify_booking;
use crate::error::AppError;
use crate::state::AppState;

pub async fn verify(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VerifyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let provider = state.scheduling()?;
    let (reference, email) = query.required()?;

    info!("verify: looking up {}", reference);
    let booking = verify_booking(provider.as_ref(), reference, email).await?;

    Ok(Json(VerifyResponse { success: true, booking }))
}
