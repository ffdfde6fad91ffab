//! Denormalized read models assembled per request. Nothing here is stored.

use serde::Serialize;

use super::appointment::Appointment;
use super::doctor::Doctor;
use super::patient::Patient;

/// Appointment joined with its patient and (optionally) assigned doctor.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentWithDetails {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub patient: Patient,
    pub doctor: Option<Doctor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub active_consultations: i64,
    pub avg_wait_minutes: i64,
    pub daily_throughput: i64,
    pub optimization_score: i64,
    pub queue_efficiency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalanceSuggestion {
    pub overloaded_doctor_id: i64,
    pub underutilized_doctor_id: i64,
    pub suggested_transfer_count: i64,
    pub reason: String,
}
