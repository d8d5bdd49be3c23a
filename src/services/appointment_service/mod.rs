pub mod get;
pub mod set;
pub mod update;

pub use get::list_appointments_handler;
pub use set::set_appointment_handler;
pub use update::update_appointment_handler;
