//! Doctor roster endpoints: CRUD, break reset, fatigue status.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{create_doctor, get_doctor, record_break, update_doctor};
use crate::fatigue;
use crate::models::{Doctor, InsertDoctor, UpdateDoctor};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FatigueResponse {
    pub fatigue_score: i64,
    pub break_suggested: bool,
    pub is_overworked: bool,
}

fn valid_hhmm(value: &str) -> bool {
    let Some((hours, minutes)) = value.split_once(':') else {
        return false;
    };
    hours.len() == 2
        && minutes.len() == 2
        && hours.parse::<u8>().is_ok_and(|h| h < 24)
        && minutes.parse::<u8>().is_ok_and(|m| m < 60)
}

fn validate_insert(doctor: &InsertDoctor) -> Result<(), ApiError> {
    if doctor.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required", "name"));
    }
    if doctor.specialization.trim().is_empty() {
        return Err(ApiError::validation("Specialization is required", "specialization"));
    }
    if !valid_hhmm(&doctor.working_hours_start) {
        return Err(ApiError::validation(
            "Working hours must be HH:MM",
            "workingHoursStart",
        ));
    }
    if !valid_hhmm(&doctor.working_hours_end) {
        return Err(ApiError::validation(
            "Working hours must be HH:MM",
            "workingHoursEnd",
        ));
    }
    if doctor.max_daily_capacity <= 0 {
        return Err(ApiError::validation(
            "Daily capacity must be positive",
            "maxDailyCapacity",
        ));
    }
    if !(0..=100).contains(&doctor.fatigue_score) {
        return Err(ApiError::validation(
            "Fatigue score must be between 0 and 100",
            "fatigueScore",
        ));
    }
    Ok(())
}

fn validate_update(updates: &UpdateDoctor) -> Result<(), ApiError> {
    if updates.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(ApiError::validation("Name is required", "name"));
    }
    if let Some(start) = &updates.working_hours_start {
        if !valid_hhmm(start) {
            return Err(ApiError::validation("Working hours must be HH:MM", "workingHoursStart"));
        }
    }
    if let Some(end) = &updates.working_hours_end {
        if !valid_hhmm(end) {
            return Err(ApiError::validation("Working hours must be HH:MM", "workingHoursEnd"));
        }
    }
    if updates.max_daily_capacity.is_some_and(|c| c <= 0) {
        return Err(ApiError::validation("Daily capacity must be positive", "maxDailyCapacity"));
    }
    if updates.fatigue_score.is_some_and(|f| !(0..=100).contains(&f)) {
        return Err(ApiError::validation(
            "Fatigue score must be between 0 and 100",
            "fatigueScore",
        ));
    }
    Ok(())
}

/// `GET /api/doctors` — the full roster, unfiltered.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Doctor>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(crate::db::repository::list_doctors(&conn)?))
}

/// `POST /api/doctors` — create a doctor (administrative).
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(doctor): Json<InsertDoctor>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    validate_insert(&doctor)?;
    let conn = ctx.conn()?;
    let created = create_doctor(&conn, &doctor)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/doctors/:id` — partial update.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(updates): Json<UpdateDoctor>,
) -> Result<Json<Doctor>, ApiError> {
    validate_update(&updates)?;
    let conn = ctx.conn()?;
    let updated = update_doctor(&conn, id, &updates)?.ok_or(ApiError::NotFound("Doctor"))?;
    Ok(Json(updated))
}

/// `POST /api/doctors/:id/break` — break reset: fatigue to 0, overworked
/// cleared, break time stamped. Returns the persisted row.
pub async fn give_break(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Doctor>, ApiError> {
    let conn = ctx.conn()?;
    let rested = record_break(&conn, id, Utc::now())?.ok_or(ApiError::NotFound("Doctor"))?;
    Ok(Json(rested))
}

/// `GET /api/doctors/:id/fatigue` — fatigue status read.
pub async fn fatigue_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<FatigueResponse>, ApiError> {
    let conn = ctx.conn()?;
    let doctor = get_doctor(&conn, id)?.ok_or(ApiError::NotFound("Doctor"))?;
    Ok(Json(FatigueResponse {
        fatigue_score: doctor.fatigue_score,
        break_suggested: fatigue::break_suggested(doctor.fatigue_score),
        is_overworked: doctor.is_overworked,
    }))
}
