// src/models/mod.rs

pub mod app;
pub mod appointments;
pub mod prescriptions;

pub use app::AppState;
pub use appointments::{
    Appointment, AppointmentPatch, AppointmentStatus, AppointmentType, NewAppointment,
    UnknownVariant,
};
pub use prescriptions::Prescription;
