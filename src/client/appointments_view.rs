use std::fmt;
use std::str::FromStr;

use super::http::PortalApi;
use super::schedule_form::ScheduleForm;
use crate::models::{Appointment, AppointmentStatus, UnknownVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Upcoming,
    Completed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Upcoming => "Upcoming",
            StatusFilter::Completed => "Completed",
        }
    }

    pub fn matches(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Upcoming => status == AppointmentStatus::Upcoming,
            StatusFilter::Completed => status == AppointmentStatus::Completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(StatusFilter::All),
            "Upcoming" => Ok(StatusFilter::Upcoming),
            "Completed" => Ok(StatusFilter::Completed),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "My Appointments" screen state: the fetched list plus a status filter.
#[derive(Debug, Clone, Default)]
pub struct AppointmentsView {
    appointments: Vec<Appointment>,
    pub filter: StatusFilter,
}

impl AppointmentsView {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        AppointmentsView {
            appointments,
            filter: StatusFilter::All,
        }
    }

    /// Fetch once. A failed fetch is logged and leaves the list empty.
    pub async fn load<A: PortalApi + ?Sized>(api: &A) -> Self {
        match api.list_appointments().await {
            Ok(appointments) => AppointmentsView::new(appointments),
            Err(e) => {
                tracing::error!("Error fetching appointments: {}", e);
                AppointmentsView::default()
            }
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn visible(&self) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| self.filter.matches(a.status))
            .collect()
    }

    /// Form pre-filled for rescheduling `id`, if it is in the list.
    pub fn reschedule(&self, id: i64) -> Option<ScheduleForm> {
        self.appointments
            .iter()
            .find(|a| a.id == id)
            .map(ScheduleForm::for_reschedule)
    }
}
