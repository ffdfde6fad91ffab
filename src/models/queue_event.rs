use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only audit record, written once per appointment status change.
/// Never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEvent {
    pub id: i64,
    pub event_type: String,
    pub appointment_id: i64,
    pub timestamp: DateTime<Utc>,
}
