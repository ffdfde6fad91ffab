use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Doctor, InsertDoctor, UpdateDoctor};

const DOCTOR_COLUMNS: &str = "id, name, specialization, working_hours_start, working_hours_end,
     max_daily_capacity, fatigue_score, last_break_time, is_overworked";

pub fn list_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {DOCTOR_COLUMNS} FROM doctors ORDER BY id"))?;
    let rows = stmt.query_map([], doctor_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn get_doctor(conn: &Connection, id: i64) -> Result<Option<Doctor>, DatabaseError> {
    let doctor = conn
        .query_row(
            &format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = ?1"),
            params![id],
            doctor_from_row,
        )
        .optional()?;
    Ok(doctor)
}

pub fn create_doctor(conn: &Connection, doctor: &InsertDoctor) -> Result<Doctor, DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (name, specialization, working_hours_start, working_hours_end,
         max_daily_capacity, fatigue_score, last_break_time, is_overworked)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            doctor.name,
            doctor.specialization,
            doctor.working_hours_start,
            doctor.working_hours_end,
            doctor.max_daily_capacity,
            doctor.fatigue_score,
            doctor.last_break_time,
            doctor.is_overworked,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_doctor(conn, id)?.ok_or(DatabaseError::NotFound {
        entity_type: "Doctor".into(),
        id,
    })
}

/// Partial update; absent fields keep their stored value. Returns `None`
/// when no doctor has the given id.
pub fn update_doctor(
    conn: &Connection,
    id: i64,
    updates: &UpdateDoctor,
) -> Result<Option<Doctor>, DatabaseError> {
    let changed = conn.execute(
        "UPDATE doctors SET
             name = COALESCE(?2, name),
             specialization = COALESCE(?3, specialization),
             working_hours_start = COALESCE(?4, working_hours_start),
             working_hours_end = COALESCE(?5, working_hours_end),
             max_daily_capacity = COALESCE(?6, max_daily_capacity),
             fatigue_score = COALESCE(?7, fatigue_score),
             last_break_time = COALESCE(?8, last_break_time),
             is_overworked = COALESCE(?9, is_overworked)
         WHERE id = ?1",
        params![
            id,
            updates.name,
            updates.specialization,
            updates.working_hours_start,
            updates.working_hours_end,
            updates.max_daily_capacity,
            updates.fatigue_score,
            updates.last_break_time,
            updates.is_overworked,
        ],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_doctor(conn, id)
}

/// Persist a break reset: fatigue back to 0, overworked cleared, break
/// timestamp recorded. Returns `None` when no doctor has the given id.
pub fn record_break(
    conn: &Connection,
    id: i64,
    at: DateTime<Utc>,
) -> Result<Option<Doctor>, DatabaseError> {
    let changed = conn.execute(
        "UPDATE doctors SET fatigue_score = 0, is_overworked = 0, last_break_time = ?2
         WHERE id = ?1",
        params![id, at],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_doctor(conn, id)
}

fn doctor_from_row(row: &rusqlite::Row<'_>) -> Result<Doctor, rusqlite::Error> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
        working_hours_start: row.get(3)?,
        working_hours_end: row.get(4)?,
        max_daily_capacity: row.get(5)?,
        fatigue_score: row.get(6)?,
        last_break_time: row.get(7)?,
        is_overworked: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn sample_doctor(name: &str, fatigue: i64) -> InsertDoctor {
        InsertDoctor {
            name: name.into(),
            specialization: "Internal Medicine".into(),
            working_hours_start: "09:00".into(),
            working_hours_end: "17:00".into(),
            max_daily_capacity: 20,
            fatigue_score: fatigue,
            last_break_time: None,
            is_overworked: false,
        }
    }

    #[test]
    fn create_and_list_doctors() {
        let conn = open_memory_database().unwrap();
        create_doctor(&conn, &sample_doctor("Dr. Foster", 82)).unwrap();
        create_doctor(&conn, &sample_doctor("Dr. Liu", 45)).unwrap();

        let doctors = list_doctors(&conn).unwrap();
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].name, "Dr. Foster");
        assert_eq!(doctors[0].fatigue_score, 82);
    }

    #[test]
    fn update_doctor_is_partial() {
        let conn = open_memory_database().unwrap();
        let created = create_doctor(&conn, &sample_doctor("Dr. Foster", 82)).unwrap();

        let updates = UpdateDoctor {
            fatigue_score: Some(10),
            ..Default::default()
        };
        let updated = update_doctor(&conn, created.id, &updates).unwrap().unwrap();
        assert_eq!(updated.fatigue_score, 10);
        // Untouched fields keep their values
        assert_eq!(updated.name, "Dr. Foster");
        assert_eq!(updated.max_daily_capacity, 20);
    }

    #[test]
    fn update_doctor_accepts_break_time() {
        let conn = open_memory_database().unwrap();
        let created = create_doctor(&conn, &sample_doctor("Dr. Foster", 82)).unwrap();

        let at = Utc::now();
        let updates = UpdateDoctor {
            last_break_time: Some(at),
            ..Default::default()
        };
        let updated = update_doctor(&conn, created.id, &updates).unwrap().unwrap();
        assert_eq!(updated.last_break_time, Some(at));
        assert_eq!(updated.fatigue_score, 82);
    }

    #[test]
    fn update_missing_doctor_returns_none() {
        let conn = open_memory_database().unwrap();
        let result = update_doctor(&conn, 99, &UpdateDoctor::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn record_break_resets_fields() {
        let conn = open_memory_database().unwrap();
        let mut insert = sample_doctor("Dr. Foster", 82);
        insert.is_overworked = true;
        let created = create_doctor(&conn, &insert).unwrap();

        let now = Utc::now();
        let rested = record_break(&conn, created.id, now).unwrap().unwrap();
        assert_eq!(rested.fatigue_score, 0);
        assert!(!rested.is_overworked);
        assert_eq!(rested.last_break_time, Some(now));
    }
}
