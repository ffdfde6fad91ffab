pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod doctors;
pub mod patients;
