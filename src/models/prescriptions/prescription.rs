use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: i64,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: String, // M/D/YYYY
    pub end_date: String,   // M/D/YYYY
    pub doctor: String,
    pub instructions: String,
    pub refills_left: u32,
}
