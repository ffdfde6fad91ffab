pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod patient;
pub mod queue_event;
pub mod user;
pub mod views;

pub use appointment::*;
pub use doctor::*;
pub use patient::*;
pub use queue_event::*;
pub use user::*;
pub use views::*;
