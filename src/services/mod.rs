pub mod appointment_service;
pub mod prescription_service;

pub use appointment_service::{
    list_appointments_handler, set_appointment_handler, update_appointment_handler,
};
pub use prescription_service::list_prescriptions_handler;
