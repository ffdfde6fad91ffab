//! Demo seed data so a fresh install renders a populated dashboard.

use chrono::Utc;
use rusqlite::Connection;

use crate::db::repository::{create_appointment, create_doctor, create_patient, list_doctors};
use crate::db::DatabaseError;
use crate::models::enums::{AppointmentStatus, VisitType};
use crate::models::{InsertAppointment, InsertDoctor, InsertPatient};

/// Seed demo doctors, patients and appointments. No-op when any doctor
/// already exists.
pub fn seed_demo_data(conn: &Connection) -> Result<(), DatabaseError> {
    if !list_doctors(conn)?.is_empty() {
        return Ok(());
    }
    tracing::info!("Seeding demo clinic data");

    let d1 = create_doctor(
        conn,
        &InsertDoctor {
            name: "Dr. Amanda Foster".into(),
            specialization: "Internal Medicine".into(),
            working_hours_start: "09:00".into(),
            working_hours_end: "17:00".into(),
            max_daily_capacity: 20,
            fatigue_score: 82,
            last_break_time: None,
            is_overworked: true,
        },
    )?;

    create_doctor(
        conn,
        &InsertDoctor {
            name: "Dr. James Liu".into(),
            specialization: "Family Practice".into(),
            working_hours_start: "09:00".into(),
            working_hours_end: "17:00".into(),
            max_daily_capacity: 25,
            fatigue_score: 45,
            last_break_time: None,
            is_overworked: false,
        },
    )?;

    create_doctor(
        conn,
        &InsertDoctor {
            name: "Dr. Maria Santos".into(),
            specialization: "Pediatrics".into(),
            working_hours_start: "10:00".into(),
            working_hours_end: "18:00".into(),
            max_daily_capacity: 15,
            fatigue_score: 28,
            last_break_time: None,
            is_overworked: false,
        },
    )?;

    let now = Utc::now();

    let p1 = create_patient(
        conn,
        &InsertPatient {
            name: "Sarah Johnson".into(),
            age: 32,
            visit_type: VisitType::FirstTime,
            problem_description: "Severe chest pain".into(),
            ai_severity_score: 9,
            urgency_score: 18,
            no_show_probability: 2,
        },
        now,
    )?;

    let p2 = create_patient(
        conn,
        &InsertPatient {
            name: "Michael Chen".into(),
            age: 45,
            visit_type: VisitType::ChronicManagement,
            problem_description: "Routine diabetes check".into(),
            ai_severity_score: 4,
            urgency_score: 8,
            no_show_probability: 10,
        },
        now,
    )?;

    create_appointment(
        conn,
        &InsertAppointment {
            patient_id: p1.id,
            doctor_id: Some(d1.id),
            predicted_duration: 25,
            scheduled_start: None,
            predicted_start: None,
            buffer_allocated: 5,
            status: AppointmentStatus::InConsultation,
        },
        now,
    )?;

    create_appointment(
        conn,
        &InsertAppointment {
            patient_id: p2.id,
            doctor_id: None,
            predicted_duration: 15,
            scheduled_start: None,
            predicted_start: None,
            buffer_allocated: 5,
            status: AppointmentStatus::Waiting,
        },
        now,
    )?;

    Ok(())
}
