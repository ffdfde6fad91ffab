//! Appointment queue endpoints.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::build_queue_view;
use crate::db::repository::{
    create_queue_event, list_appointments, list_doctors, list_patients,
    update_appointment_status,
};
use crate::models::enums::AppointmentStatus;
use crate::models::{Appointment, AppointmentWithDetails};

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// `GET /api/appointments` — every appointment joined with its patient and
/// assigned doctor.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<AppointmentWithDetails>>, ApiError> {
    let conn = ctx.conn()?;
    let appointments = list_appointments(&conn)?;
    let patients = list_patients(&conn)?;
    let doctors = list_doctors(&conn)?;
    Ok(Json(build_queue_view(&appointments, &patients, &doctors)?))
}

/// `PUT /api/appointments/:id/status` — set the status (any transition is
/// legal) and append the audit queue event.
pub async fn update_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let status = AppointmentStatus::from_str(&request.status)
        .map_err(|_| ApiError::validation("Unknown appointment status", "status"))?;

    let conn = ctx.conn()?;
    let updated =
        update_appointment_status(&conn, id, status)?.ok_or(ApiError::NotFound("Appointment"))?;

    create_queue_event(
        &conn,
        updated.id,
        &format!("status_changed_to_{}", status.as_str()),
        Utc::now(),
    )?;

    Ok(Json(updated))
}
