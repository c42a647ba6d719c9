use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::dtos::requests::AvailabilityQuery;
use crate::api::dtos::responses::{AvailabilityResponse, BookingCreatedResponse};
use crate::domain::services::availability::fetch_availability;
use crate::domain::services::booking_flow::submit_booking;
use crate::domain::services::normalize::parse_local_date;
use crate::domain::services::validation::parse_submission;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let provider = state.scheduling()?;

    let Json(body) = payload.map_err(|rejection| {
        warn!("create_booking: unreadable body: {}", rejection.body_text());
        AppError::InvalidSubmission(vec![rejection.body_text()])
    })?;

    let submission = parse_submission(body).inspect_err(|e| warn!("create_booking: {}", e))?;
    info!(
        "create_booking: {} trip for {} on {} {}",
        submission.trip_type, submission.attendee.email, submission.date, submission.time
    );

    let confirmed = submit_booking(provider.as_ref(), &state.booking_defaults(), &submission).await?;
    Ok(Json(BookingCreatedResponse::from(confirmed)))
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let provider = state.scheduling()?;
    let (event_type_id, start, end) = query.required()?;

    let event_type_id: u64 = event_type_id
        .parse()
        .map_err(|_| AppError::Validation(format!("eventTypeId must be a number: {}", event_type_id)))?;
    let start = parse_local_date(start)?;
    let end = parse_local_date(end)?;

    let availability = fetch_availability(provider.as_ref(), event_type_id, start, end).await?;
    info!(
        "check_availability: {} slots for event type {} between {} and {}",
        availability.slots.len(),
        event_type_id,
        start,
        end
    );

    Ok(Json(AvailabilityResponse {
        success: true,
        available: availability.available,
        slots: availability.slots,
    }))
}
