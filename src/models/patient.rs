use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::VisitType;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub visit_type: VisitType,
    pub problem_description: String,
    /// 0 - 10, assigned by the triage heuristic at intake.
    pub ai_severity_score: i64,
    pub urgency_score: i64,
    /// 0 - 100
    pub no_show_probability: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct InsertPatient {
    pub name: String,
    pub age: i64,
    pub visit_type: VisitType,
    pub problem_description: String,
    pub ai_severity_score: i64,
    pub urgency_score: i64,
    pub no_show_probability: i64,
}
