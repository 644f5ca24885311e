//! Prescription Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for creating a prescription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrescription {
    /// Appointment this prescription was written in. Not checked against
    /// the appointment list.
    pub appointment_id: String,
    pub medicine_name: String,
    pub dosage: String,
    #[serde(default)]
    pub instructions: String,
}

/// A recorded prescription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub appointment_id: String,
    pub medicine_name: String,
    pub dosage: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}

impl Prescription {
    /// Issue a prescription with a fresh id, stamped now.
    pub fn issue(data: NewPrescription) -> Self {
        Self::issue_at(data, Utc::now())
    }

    pub fn issue_at(data: NewPrescription, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            appointment_id: data.appointment_id,
            medicine_name: data.medicine_name,
            dosage: data.dosage,
            instructions: data.instructions,
            created_at,
        }
    }

    pub fn has_instructions(&self) -> bool {
        !self.instructions.is_empty()
    }
}
