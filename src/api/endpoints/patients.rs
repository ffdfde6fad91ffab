//! Patient endpoints: listing, name search, and walk-in intake.
//!
//! Walk-in intake is the one write path that spans two entities: the
//! patient is created first, then an appointment referencing it.

use std::str::FromStr;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::{
    create_appointment, create_patient, list_doctors, list_patients, search_patients,
};
use crate::models::enums::{AppointmentStatus, VisitType};
use crate::models::{InsertAppointment, InsertPatient, Patient};
use crate::triage::{self, TriageInput};

/// Walk-ins are assumed unlikely to no-show; they are already in the lobby.
const WALKIN_NO_SHOW_PROBABILITY: i64 = 5;

/// Fixed scheduling slack added to every walk-in appointment, in minutes.
const WALKIN_BUFFER_MINUTES: i64 = 5;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkInRequest {
    pub name: String,
    pub age: i64,
    pub visit_type: String,
    pub problem_description: String,
    #[serde(default)]
    pub is_emergency: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkInResponse {
    #[serde(flatten)]
    pub patient: Patient,
    pub severity_score: i64,
    pub explanation: String,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /api/patients` — all patients.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(list_patients(&conn)?))
}

/// `GET /api/patients/search?q=` — case-insensitive name substring match.
pub async fn search(
    State(ctx): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(search_patients(&conn, &query.q)?))
}

/// `POST /api/walkin` — triage and register a walk-in patient.
///
/// Creates the patient with triage scores, then an appointment in the
/// waiting state, assigned to the first doctor on the roster (or left
/// unassigned when the roster is empty).
pub async fn walkin(
    State(ctx): State<ApiContext>,
    Json(request): Json<WalkInRequest>,
) -> Result<(StatusCode, Json<WalkInResponse>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required", "name"));
    }
    if request.age < 0 {
        return Err(ApiError::validation("Age must be non-negative", "age"));
    }
    if request.problem_description.trim().is_empty() {
        return Err(ApiError::validation(
            "Problem description is required",
            "problemDescription",
        ));
    }
    let visit_type = VisitType::from_str(&request.visit_type)
        .map_err(|_| ApiError::validation("Unknown visit type", "visitType"))?;

    let scored = triage::triage(&TriageInput {
        age: request.age,
        visit_type,
        problem_description: &request.problem_description,
        is_emergency: request.is_emergency,
    });

    let now = Utc::now();
    let conn = ctx.conn()?;

    let patient = create_patient(
        &conn,
        &InsertPatient {
            name: request.name,
            age: request.age,
            visit_type,
            problem_description: request.problem_description,
            ai_severity_score: scored.severity_score,
            urgency_score: scored.urgency_score,
            no_show_probability: WALKIN_NO_SHOW_PROBABILITY,
        },
        now,
    )?;

    // First available doctor, or leave in the general pool
    let doctor_id = list_doctors(&conn)?.first().map(|d| d.id);

    create_appointment(
        &conn,
        &InsertAppointment {
            patient_id: patient.id,
            doctor_id,
            predicted_duration: triage::predicted_duration(visit_type),
            scheduled_start: None,
            predicted_start: None,
            buffer_allocated: WALKIN_BUFFER_MINUTES,
            status: AppointmentStatus::Waiting,
        },
        now,
    )?;

    tracing::info!(
        patient_id = patient.id,
        severity = scored.severity_score,
        "Walk-in registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(WalkInResponse {
            patient,
            severity_score: scored.severity_score,
            explanation: scored.explanation,
        }),
    ))
}
