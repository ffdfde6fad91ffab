use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    /// Null until a doctor is assigned.
    pub doctor_id: Option<i64>,
    /// Minutes.
    pub predicted_duration: i64,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub predicted_start: Option<DateTime<Utc>>,
    /// Minutes.
    pub buffer_allocated: i64,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct InsertAppointment {
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    pub predicted_duration: i64,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub predicted_start: Option<DateTime<Utc>>,
    pub buffer_allocated: i64,
    pub status: AppointmentStatus,
}
