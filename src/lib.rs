//! ClinicFlow — walk-in clinic operations backend.
//!
//! Heuristic triage, doctor fatigue tracking, and a live appointment
//! queue, served over a cookie-authenticated JSON API backed by SQLite.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod fatigue;
pub mod models;
pub mod seed;
pub mod triage;
