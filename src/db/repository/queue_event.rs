use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::QueueEvent;

/// Append a queue event. Events are an audit trail — there is no update or
/// delete path.
pub fn create_queue_event(
    conn: &Connection,
    appointment_id: i64,
    event_type: &str,
    timestamp: DateTime<Utc>,
) -> Result<QueueEvent, DatabaseError> {
    conn.execute(
        "INSERT INTO queue_events (event_type, appointment_id, timestamp)
         VALUES (?1, ?2, ?3)",
        params![event_type, appointment_id, timestamp],
    )?;
    Ok(QueueEvent {
        id: conn.last_insert_rowid(),
        event_type: event_type.to_string(),
        appointment_id,
        timestamp,
    })
}

pub fn list_queue_events(
    conn: &Connection,
    appointment_id: i64,
) -> Result<Vec<QueueEvent>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, event_type, appointment_id, timestamp
         FROM queue_events WHERE appointment_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![appointment_id], |row| {
        Ok(QueueEvent {
            id: row.get(0)?,
            event_type: row.get(1)?,
            appointment_id: row.get(2)?,
            timestamp: row.get(3)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
