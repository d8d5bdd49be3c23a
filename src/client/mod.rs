// src/client/mod.rs

pub mod appointments_view;
pub mod http;
pub mod prescriptions_view;
pub mod schedule_form;

pub use appointments_view::{AppointmentsView, StatusFilter};
pub use http::{ClientError, PortalApi, PortalClient};
pub use prescriptions_view::{duration_hours, DurationHours, PrescriptionsView, SearchField, SortOrder};
pub use schedule_form::{
    local_today, FormError, FormEvent, FormField, FormPhase, ScheduleForm, DOCTOR_OPTIONS,
};
