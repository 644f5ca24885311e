//! Prescription form validation
//!
//! The store does not check prescription input. The form checks it here
//! first, and only a valid draft becomes a [`NewPrescription`].

use crate::error::{Result, ValidationError};
use crate::model::{NewPrescription, Prescription};
use crate::store::ClinicStore;

/// Contents of the "New Prescription" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrescriptionDraft {
    pub medicine_name: String,
    pub dosage: String,
    pub instructions: String,
}

impl PrescriptionDraft {
    pub fn new(
        medicine_name: impl Into<String>,
        dosage: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            medicine_name: medicine_name.into(),
            dosage: dosage.into(),
            instructions: instructions.into(),
        }
    }

    /// Trim every field and build the create payload.
    ///
    /// Medicine name and dosage must be non-empty after trimming;
    /// instructions may be empty.
    pub fn validate(
        &self,
        appointment_id: &str,
    ) -> std::result::Result<NewPrescription, ValidationError> {
        let medicine_name = self.medicine_name.trim();
        let dosage = self.dosage.trim();

        if medicine_name.is_empty() {
            return Err(ValidationError::MissingMedicineName);
        }
        if dosage.is_empty() {
            return Err(ValidationError::MissingDosage);
        }

        Ok(NewPrescription {
            appointment_id: appointment_id.to_string(),
            medicine_name: medicine_name.to_string(),
            dosage: dosage.to_string(),
            instructions: self.instructions.trim().to_string(),
        })
    }

    /// Validate, then create through `store`. An invalid draft never
    /// reaches the store and leaves its state untouched.
    pub async fn submit(&self, store: &ClinicStore, appointment_id: &str) -> Result<Prescription> {
        let data = self.validate(appointment_id)?;
        store.create_prescription(data).await
    }

    /// Reset the form. Done after a successful create only; a failed create
    /// keeps the input for retry.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.medicine_name.is_empty() && self.dosage.is_empty() && self.instructions.is_empty()
    }
}
