use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    /// "HH:MM", e.g. "09:00"
    pub working_hours_start: String,
    pub working_hours_end: String,
    pub max_daily_capacity: i64,
    /// 0 - 100
    pub fatigue_score: i64,
    pub last_break_time: Option<DateTime<Utc>>,
    pub is_overworked: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertDoctor {
    pub name: String,
    pub specialization: String,
    pub working_hours_start: String,
    pub working_hours_end: String,
    pub max_daily_capacity: i64,
    #[serde(default)]
    pub fatigue_score: i64,
    #[serde(default)]
    pub last_break_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_overworked: bool,
}

/// Partial update for `PUT /api/doctors/:id`. Absent fields keep their
/// stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctor {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub working_hours_start: Option<String>,
    pub working_hours_end: Option<String>,
    pub max_daily_capacity: Option<i64>,
    pub fatigue_score: Option<i64>,
    pub last_break_time: Option<DateTime<Utc>>,
    pub is_overworked: Option<bool>,
}
