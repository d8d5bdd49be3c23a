//! The scheduling form as a single state machine.
//!
//! ```text
//! Idle | Success | Error --Submit--> Validating
//! Validating --ValidationFailed--> Idle
//! Validating --ValidationPassed--> Submitting
//! Submitting --RequestSucceeded--> Success
//! Submitting --RequestFailed--> Error
//! Submitting --Abandon--> Idle
//! anything but Submitting/Validating --Edit--> Idle
//! ```
//!
//! The form only leaves `Submitting` once the request has actually settled.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

use super::http::PortalApi;
use crate::models::{Appointment, AppointmentPatch, AppointmentType, NewAppointment};
use crate::utils::parse_iso_date;

/// Today's date in the machine's local time zone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Providers offered by the doctor picker.
pub const DOCTOR_OPTIONS: [&str; 8] = [
    "Dr. Smith",
    "Dr. Hari",
    "Dr. Manu",
    "Dr. Sri",
    "Dr. Vishnu",
    "Dr. Pant",
    "Dr. Sarah Johnson",
    "Dr. Michael Chen",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Doctor,
    Date,
    Time,
    Reason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
    Success(Appointment),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    ValidationFailed,
    ValidationPassed,
    RequestSucceeded(Appointment),
    RequestFailed(String),
    Abandon,
    Edit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Cannot apply {event} while {phase}")]
    IllegalTransition {
        phase: &'static str,
        event: &'static str,
    },
}

impl FormPhase {
    pub fn name(&self) -> &'static str {
        match self {
            FormPhase::Idle => "idle",
            FormPhase::Validating => "validating",
            FormPhase::Submitting => "submitting",
            FormPhase::Success(_) => "success",
            FormPhase::Error(_) => "error",
        }
    }

    pub fn next(&self, event: FormEvent) -> Result<FormPhase, FormError> {
        use FormEvent as E;
        use FormPhase as P;

        match (self, event) {
            (P::Idle | P::Success(_) | P::Error(_), E::Submit) => Ok(P::Validating),
            (P::Validating, E::ValidationFailed) => Ok(P::Idle),
            (P::Validating, E::ValidationPassed) => Ok(P::Submitting),
            (P::Submitting, E::RequestSucceeded(appointment)) => Ok(P::Success(appointment)),
            (P::Submitting, E::RequestFailed(message)) => Ok(P::Error(message)),
            (P::Submitting, E::Abandon) => Ok(P::Idle),
            (P::Idle | P::Success(_) | P::Error(_), E::Edit) => Ok(P::Idle),
            (phase, event) => Err(FormError::IllegalTransition {
                phase: phase.name(),
                event: event.name(),
            }),
        }
    }
}

impl FormEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::Submit => "submit",
            FormEvent::ValidationFailed => "validation-failed",
            FormEvent::ValidationPassed => "validation-passed",
            FormEvent::RequestSucceeded(_) => "request-succeeded",
            FormEvent::RequestFailed(_) => "request-failed",
            FormEvent::Abandon => "abandon",
            FormEvent::Edit => "edit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub doctor: String,
    pub date: String, // YYYY-MM-DD
    pub time: String,
    pub kind: AppointmentType,
    pub reason: String,
    rescheduling: Option<i64>,
    errors: BTreeMap<FormField, String>,
    phase: FormPhase,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        ScheduleForm::new()
    }
}

impl ScheduleForm {
    pub fn new() -> Self {
        ScheduleForm {
            doctor: String::new(),
            date: String::new(),
            time: String::new(),
            kind: AppointmentType::VideoCall,
            reason: String::new(),
            rescheduling: None,
            errors: BTreeMap::new(),
            phase: FormPhase::Idle,
        }
    }

    /// Pre-filled form that updates `appointment` instead of creating one.
    pub fn for_reschedule(appointment: &Appointment) -> Self {
        ScheduleForm {
            doctor: appointment.doctor.clone(),
            date: appointment.date.clone(),
            time: appointment.time.clone(),
            kind: appointment.kind,
            reason: appointment.reason.clone(),
            rescheduling: Some(appointment.id),
            ..ScheduleForm::new()
        }
    }

    pub fn is_reschedule(&self) -> bool {
        self.rescheduling.is_some()
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Inputs are locked while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn errors(&self) -> &BTreeMap<FormField, String> {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    fn advance(&mut self, event: FormEvent) -> Result<(), FormError> {
        self.phase = self.phase.next(event)?;
        Ok(())
    }

    /// Change a text field and clear its error.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        self.advance(FormEvent::Edit)?;
        let value = value.into();
        match field {
            FormField::Doctor => self.doctor = value,
            FormField::Date => self.date = value,
            FormField::Time => self.time = value,
            FormField::Reason => self.reason = value,
        }
        self.errors.remove(&field);
        Ok(())
    }

    pub fn set_kind(&mut self, kind: AppointmentType) -> Result<(), FormError> {
        self.advance(FormEvent::Edit)?;
        self.kind = kind;
        Ok(())
    }

    /// Field-level errors for the current values; empty when the form may
    /// be submitted.
    pub fn validate(&self, today: NaiveDate) -> BTreeMap<FormField, String> {
        let mut errors = BTreeMap::new();

        if self.doctor.is_empty() {
            errors.insert(FormField::Doctor, "Doctor is required".to_string());
        }
        if self.date.is_empty() {
            errors.insert(FormField::Date, "Date is required".to_string());
        } else {
            match parse_iso_date(&self.date) {
                Some(selected) if selected < today => {
                    errors.insert(FormField::Date, "Please select a future date".to_string());
                }
                Some(_) => {}
                None => {
                    errors.insert(FormField::Date, "Please select a valid date".to_string());
                }
            }
        }
        if self.time.is_empty() {
            errors.insert(FormField::Time, "Time is required".to_string());
        }
        if self.reason.is_empty() {
            errors.insert(FormField::Reason, "Reason is required".to_string());
        }

        errors
    }

    /// [`validate`](Self::validate) against the local calendar date.
    pub fn validate_now(&self) -> BTreeMap<FormField, String> {
        self.validate(local_today())
    }

    fn new_appointment(&self) -> NewAppointment {
        NewAppointment {
            doctor: Some(self.doctor.clone()),
            date: Some(self.date.clone()),
            time: Some(self.time.clone()),
            kind: Some(self.kind),
            status: None,
            reason: Some(self.reason.clone()),
        }
    }

    fn patch(&self) -> AppointmentPatch {
        AppointmentPatch {
            doctor: Some(self.doctor.clone()),
            date: Some(self.date.clone()),
            time: Some(self.time.clone()),
            kind: Some(self.kind),
            status: None,
            reason: Some(self.reason.clone()),
        }
    }

    /// Validate and, if clean, create or update the appointment. Returns the
    /// phase the form settled in: `Idle` with errors set, `Success` or
    /// `Error`.
    pub async fn submit<A: PortalApi + ?Sized>(
        &mut self,
        api: &A,
        today: NaiveDate,
    ) -> Result<&FormPhase, FormError> {
        self.advance(FormEvent::Submit)?;

        let errors = self.validate(today);
        if !errors.is_empty() {
            self.errors = errors;
            self.advance(FormEvent::ValidationFailed)?;
            return Ok(&self.phase);
        }
        self.errors.clear();
        self.advance(FormEvent::ValidationPassed)?;

        let result = match self.rescheduling {
            Some(id) => api.update_appointment(id, &self.patch()).await,
            None => api.create_appointment(&self.new_appointment()).await,
        };

        let event = match result {
            Ok(appointment) => FormEvent::RequestSucceeded(appointment),
            Err(e) => {
                tracing::warn!("Appointment submission failed: {}", e);
                FormEvent::RequestFailed(e.to_string())
            }
        };
        self.advance(event)?;
        Ok(&self.phase)
    }

    /// [`submit`](Self::submit) against the local calendar date.
    pub async fn submit_now<A: PortalApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<&FormPhase, FormError> {
        self.submit(api, local_today()).await
    }

    /// Drop an in-flight submission whose future was cancelled.
    pub fn abandon(&mut self) -> Result<(), FormError> {
        self.advance(FormEvent::Abandon)
    }
}
