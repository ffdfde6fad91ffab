//! Dashboard aggregation and load-balance suggestion endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::{build_queue_view, build_summary};
use crate::db::repository::{list_appointments, list_doctors, list_patients};
use crate::fatigue::suggest_load_balance;
use crate::models::{AnalyticsSummary, AppointmentWithDetails, Doctor, LoadBalanceSuggestion};

#[derive(Serialize)]
pub struct DashboardResponse {
    pub doctors: Vec<Doctor>,
    pub queue: Vec<AppointmentWithDetails>,
    pub analytics: AnalyticsSummary,
}

/// `GET /api/dashboard` — doctors, queue view and analytics in one response.
///
/// The three table reads are independent; a write interleaving between them
/// can yield a momentarily inconsistent snapshot. Accepted staleness, not a
/// bug.
pub async fn data(State(ctx): State<ApiContext>) -> Result<Json<DashboardResponse>, ApiError> {
    let conn = ctx.conn()?;
    let doctors = list_doctors(&conn)?;
    let appointments = list_appointments(&conn)?;
    let patients = list_patients(&conn)?;

    let queue = build_queue_view(&appointments, &patients, &doctors)?;
    let analytics = build_summary(&queue);

    Ok(Json(DashboardResponse {
        doctors,
        queue,
        analytics,
    }))
}

/// `GET /api/load-balance/suggestions` — at most one first-match pairing.
pub async fn load_balance_suggestions(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<LoadBalanceSuggestion>>, ApiError> {
    let conn = ctx.conn()?;
    let doctors = list_doctors(&conn)?;
    Ok(Json(suggest_load_balance(&doctors)))
}
