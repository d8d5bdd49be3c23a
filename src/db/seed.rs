use crate::models::{Appointment, AppointmentStatus, AppointmentType, Prescription};

/// Sample appointments every fresh store starts with.
pub fn appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: 1,
            doctor: "Dr. Sarah Johnson".to_string(),
            date: "2025-07-22".to_string(),
            time: "10:00".to_string(),
            kind: AppointmentType::VideoCall,
            status: AppointmentStatus::Upcoming,
            reason: "Annual Physical Examination".to_string(),
        },
        Appointment {
            id: 2,
            doctor: "Dr. Michael Chen".to_string(),
            date: "2025-07-25".to_string(),
            time: "14:00".to_string(),
            kind: AppointmentType::InPerson,
            status: AppointmentStatus::Upcoming,
            reason: "Follow-up on blood pressure".to_string(),
        },
    ]
}

pub fn prescriptions() -> Vec<Prescription> {
    vec![
        Prescription {
            id: 1,
            name: "Albuterol Inhaler".to_string(),
            dosage: "90mcg".to_string(),
            frequency: "As needed".to_string(),
            start_date: "1/1/2024".to_string(),
            end_date: "12/31/2024".to_string(),
            doctor: "Dr. Sarah Johnson".to_string(),
            instructions: "2 puffs every 4-6 hours as needed for asthma".to_string(),
            refills_left: 3,
        },
        Prescription {
            id: 2,
            name: "Lisinopril".to_string(),
            dosage: "10mg".to_string(),
            frequency: "Once daily".to_string(),
            start_date: "1/1/2024".to_string(),
            end_date: "12/31/2024".to_string(),
            doctor: "Dr. Michael Chen".to_string(),
            instructions: "Take with food in the morning".to_string(),
            refills_left: 5,
        },
    ]
}
