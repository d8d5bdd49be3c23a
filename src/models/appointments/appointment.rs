use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppointmentType {
    #[default]
    #[serde(rename = "Video Call")]
    VideoCall,
    // The scheduling form has always sent "In-Person"
    #[serde(rename = "In-person", alias = "In-Person")]
    InPerson,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::VideoCall => "Video Call",
            AppointmentType::InPerson => "In-person",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    Upcoming,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "Upcoming",
            AppointmentStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant '{0}'")]
pub struct UnknownVariant(pub String);

impl FromStr for AppointmentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Video Call" => Ok(AppointmentType::VideoCall),
            "In-person" | "In-Person" => Ok(AppointmentType::InPerson),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Upcoming" => Ok(AppointmentStatus::Upcoming),
            "Completed" => Ok(AppointmentStatus::Completed),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub doctor: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    pub reason: String,
}

impl Appointment {
    /// Only video appointments offer the "join video call" action.
    pub fn is_video_call(&self) -> bool {
        self.kind == AppointmentType::VideoCall
    }
}

/// Body of `POST /api/appointments`. Every field is optional and nothing is
/// validated; a client-supplied `id` is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAppointment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AppointmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl NewAppointment {
    /// Merge the supplied fields over the defaults (`status: Upcoming`).
    pub fn into_appointment(self, id: i64) -> Appointment {
        Appointment {
            id,
            doctor: self.doctor.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            reason: self.reason.unwrap_or_default(),
        }
    }
}

/// Body of `PATCH /api/appointments/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AppointmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AppointmentPatch {
    pub fn apply(self, appointment: &mut Appointment) {
        if let Some(doctor) = self.doctor {
            appointment.doctor = doctor;
        }
        if let Some(date) = self.date {
            appointment.date = date;
        }
        if let Some(time) = self.time {
            appointment.time = time;
        }
        if let Some(kind) = self.kind {
            appointment.kind = kind;
        }
        if let Some(status) = self.status {
            appointment.status = status;
        }
        if let Some(reason) = self.reason {
            appointment.reason = reason;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_appointment_defaults_status_to_upcoming() {
        let new: NewAppointment = serde_json::from_value(json!({
            "doctor": "Dr. Hari",
            "date": "2030-01-02",
            "time": "09:30",
            "type": "In-Person",
            "reason": "Checkup"
        }))
        .unwrap();

        let appt = new.into_appointment(3);
        assert_eq!(appt.id, 3);
        assert_eq!(appt.status, AppointmentStatus::Upcoming);
        assert_eq!(appt.kind, AppointmentType::InPerson);
    }

    #[test]
    fn client_supplied_id_is_ignored() {
        let new: NewAppointment =
            serde_json::from_value(json!({ "id": 99, "status": "Completed" })).unwrap();
        let appt = new.into_appointment(7);
        assert_eq!(appt.id, 7);
        assert_eq!(appt.status, AppointmentStatus::Completed);
        assert_eq!(appt.doctor, "");
    }

    #[test]
    fn appointment_serializes_type_field() {
        let appt = NewAppointment {
            kind: Some(AppointmentType::InPerson),
            ..Default::default()
        }
        .into_appointment(1);
        let value = serde_json::to_value(&appt).unwrap();
        assert_eq!(value["type"], "In-person");
        assert_eq!(value["status"], "Upcoming");
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let mut appt = NewAppointment {
            doctor: Some("Dr. Pant".into()),
            time: Some("10:00".into()),
            ..Default::default()
        }
        .into_appointment(4);

        AppointmentPatch {
            time: Some("11:15".into()),
            ..Default::default()
        }
        .apply(&mut appt);

        assert_eq!(appt.id, 4);
        assert_eq!(appt.doctor, "Dr. Pant");
        assert_eq!(appt.time, "11:15");
    }

    #[test]
    fn type_parses_both_spellings() {
        assert_eq!("In-Person".parse(), Ok(AppointmentType::InPerson));
        assert_eq!("In-person".parse(), Ok(AppointmentType::InPerson));
        assert!("Phone".parse::<AppointmentType>().is_err());
    }

    fn parse_status(value: &str) -> anyhow::Result<AppointmentStatus> {
        Ok(value.parse::<AppointmentStatus>()?)
    }

    #[test]
    fn unknown_variant_propagates_as_an_error() {
        let err = parse_status("Cancelled").unwrap_err();
        assert_eq!(err.to_string(), "unknown variant 'Cancelled'");
        assert!(err.downcast_ref::<UnknownVariant>().is_some());
        assert_eq!(parse_status("Completed").unwrap(), AppointmentStatus::Completed);
    }
}
