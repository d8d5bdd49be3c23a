pub mod appointment;

pub use appointment::{
    Appointment, AppointmentPatch, AppointmentStatus, AppointmentType, NewAppointment,
    UnknownVariant,
};
