use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::VisitType;
use crate::models::{InsertPatient, Patient};

const PATIENT_COLUMNS: &str = "id, name, age, visit_type, problem_description,
     ai_severity_score, urgency_score, no_show_probability, created_at";

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY id"))?;
    let rows = stmt.query_map([], patient_row_from_rusqlite)?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row?)?);
    }
    Ok(patients)
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"),
            params![id],
            patient_row_from_rusqlite,
        )
        .optional()?;
    row.map(patient_from_row).transpose()
}

pub fn create_patient(
    conn: &Connection,
    patient: &InsertPatient,
    created_at: DateTime<Utc>,
) -> Result<Patient, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (name, age, visit_type, problem_description,
         ai_severity_score, urgency_score, no_show_probability, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            patient.name,
            patient.age,
            patient.visit_type.as_str(),
            patient.problem_description,
            patient.ai_severity_score,
            patient.urgency_score,
            patient.no_show_probability,
            created_at,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_patient(conn, id)?.ok_or(DatabaseError::NotFound {
        entity_type: "Patient".into(),
        id,
    })
}

/// Case-insensitive substring match on patient name.
pub fn search_patients(conn: &Connection, query: &str) -> Result<Vec<Patient>, DatabaseError> {
    let pattern = format!("%{query}%");
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients
         WHERE LOWER(name) LIKE LOWER(?1) ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![pattern], patient_row_from_rusqlite)?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row?)?);
    }
    Ok(patients)
}

// Internal row type for Patient mapping
struct PatientRow {
    id: i64,
    name: String,
    age: i64,
    visit_type: String,
    problem_description: String,
    ai_severity_score: i64,
    urgency_score: i64,
    no_show_probability: i64,
    created_at: DateTime<Utc>,
}

fn patient_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<PatientRow, rusqlite::Error> {
    Ok(PatientRow {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        visit_type: row.get(3)?,
        problem_description: row.get(4)?,
        ai_severity_score: row.get(5)?,
        urgency_score: row.get(6)?,
        no_show_probability: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn patient_from_row(row: PatientRow) -> Result<Patient, DatabaseError> {
    Ok(Patient {
        id: row.id,
        name: row.name,
        age: row.age,
        visit_type: VisitType::from_str(&row.visit_type)?,
        problem_description: row.problem_description,
        ai_severity_score: row.ai_severity_score,
        urgency_score: row.urgency_score,
        no_show_probability: row.no_show_probability,
        created_at: row.created_at,
    })
}
