use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::AppointmentStatus;
use crate::models::{Appointment, InsertAppointment};

const APPOINTMENT_COLUMNS: &str = "id, patient_id, doctor_id, predicted_duration,
     scheduled_start, predicted_start, buffer_allocated, status, created_at";

pub fn list_appointments(conn: &Connection) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY id"
    ))?;
    let rows = stmt.query_map([], appointment_row_from_rusqlite)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(appointment_from_row(row?)?);
    }
    Ok(appointments)
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
            params![id],
            appointment_row_from_rusqlite,
        )
        .optional()?;
    row.map(appointment_from_row).transpose()
}

pub fn create_appointment(
    conn: &Connection,
    appointment: &InsertAppointment,
    created_at: DateTime<Utc>,
) -> Result<Appointment, DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (patient_id, doctor_id, predicted_duration,
         scheduled_start, predicted_start, buffer_allocated, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            appointment.patient_id,
            appointment.doctor_id,
            appointment.predicted_duration,
            appointment.scheduled_start,
            appointment.predicted_start,
            appointment.buffer_allocated,
            appointment.status.as_str(),
            created_at,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_appointment(conn, id)?.ok_or(DatabaseError::NotFound {
        entity_type: "Appointment".into(),
        id,
    })
}

/// Set an appointment's status. Any status is settable from any prior state;
/// there is deliberately no transition table. Returns `None` when no
/// appointment has the given id.
pub fn update_appointment_status(
    conn: &Connection,
    id: i64,
    status: AppointmentStatus,
) -> Result<Option<Appointment>, DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?2 WHERE id = ?1",
        params![id, status.as_str()],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_appointment(conn, id)
}

// Internal row type for Appointment mapping
struct AppointmentRow {
    id: i64,
    patient_id: i64,
    doctor_id: Option<i64>,
    predicted_duration: i64,
    scheduled_start: Option<DateTime<Utc>>,
    predicted_start: Option<DateTime<Utc>>,
    buffer_allocated: i64,
    status: String,
    created_at: DateTime<Utc>,
}

fn appointment_row_from_rusqlite(
    row: &rusqlite::Row<'_>,
) -> Result<AppointmentRow, rusqlite::Error> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        predicted_duration: row.get(3)?,
        scheduled_start: row.get(4)?,
        predicted_start: row.get(5)?,
        buffer_allocated: row.get(6)?,
        status: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    Ok(Appointment {
        id: row.id,
        patient_id: row.patient_id,
        doctor_id: row.doctor_id,
        predicted_duration: row.predicted_duration,
        scheduled_start: row.scheduled_start,
        predicted_start: row.predicted_start,
        buffer_allocated: row.buffer_allocated,
        status: AppointmentStatus::from_str(&row.status)?,
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::patient::create_patient;
    use crate::models::enums::VisitType;
    use crate::models::InsertPatient;

    fn seed_patient(conn: &Connection) -> i64 {
        let patient = InsertPatient {
            name: "Sarah Johnson".into(),
            age: 32,
            visit_type: VisitType::FirstTime,
            problem_description: "Severe chest pain".into(),
            ai_severity_score: 9,
            urgency_score: 18,
            no_show_probability: 2,
        };
        create_patient(conn, &patient, Utc::now()).unwrap().id
    }

    fn waiting_appointment(patient_id: i64) -> InsertAppointment {
        InsertAppointment {
            patient_id,
            doctor_id: None,
            predicted_duration: 20,
            scheduled_start: None,
            predicted_start: None,
            buffer_allocated: 5,
            status: AppointmentStatus::Waiting,
        }
    }

    #[test]
    fn create_and_list_appointments() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);
        let created =
            create_appointment(&conn, &waiting_appointment(patient_id), Utc::now()).unwrap();

        assert_eq!(created.status, AppointmentStatus::Waiting);
        assert!(created.doctor_id.is_none());
        assert_eq!(list_appointments(&conn).unwrap().len(), 1);
    }

    #[test]
    fn unassigned_doctor_round_trips_as_null() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);
        let created =
            create_appointment(&conn, &waiting_appointment(patient_id), Utc::now()).unwrap();

        let fetched = get_appointment(&conn, created.id).unwrap().unwrap();
        assert_eq!(fetched.doctor_id, None);
    }

    #[test]
    fn status_update_allows_any_transition() {
        let conn = open_memory_database().unwrap();
        let patient_id = seed_patient(&conn);
        let created =
            create_appointment(&conn, &waiting_appointment(patient_id), Utc::now()).unwrap();

        // cancelled → waiting is legal; transitions are unconstrained
        update_appointment_status(&conn, created.id, AppointmentStatus::Cancelled).unwrap();
        let revived = update_appointment_status(&conn, created.id, AppointmentStatus::Waiting)
            .unwrap()
            .unwrap();
        assert_eq!(revived.status, AppointmentStatus::Waiting);
    }

    #[test]
    fn status_update_missing_returns_none() {
        let conn = open_memory_database().unwrap();
        let result =
            update_appointment_status(&conn, 99, AppointmentStatus::Completed).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn appointment_requires_existing_patient() {
        let conn = open_memory_database().unwrap();
        let result = create_appointment(&conn, &waiting_appointment(999), Utc::now());
        assert!(result.is_err(), "foreign key on patient_id should reject");
    }
}
