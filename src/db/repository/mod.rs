pub mod appointment;
pub mod doctor;
pub mod patient;
pub mod queue_event;
pub mod user;

pub use appointment::*;
pub use doctor::*;
pub use patient::*;
pub use queue_event::*;
pub use user::*;
