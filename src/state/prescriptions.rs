//! Prescriptions State
//!
//! Append-only list of prescriptions plus the create lifecycle.

use std::collections::BTreeSet;

use serde::Serialize;

use super::lifecycle::{rejection_message, Applied, IgnoreReason, RequestId, RequestPhase};
use crate::error::Operation;
use crate::model::Prescription;

/// Events handled by the prescriptions reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrescriptionsEvent {
    /// Progress of a prescription create
    Create {
        request: RequestId,
        phase: RequestPhase<Prescription>,
    },

    /// Dismiss the last create error
    ClearError,
}

/// Prescription namespace of the root state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrescriptionsState {
    pub prescriptions: Vec<Prescription>,
    pub loading: bool,
    pub error: Option<String>,

    /// Creates awaiting their response. Every create is its own record, so
    /// overlapping creates are all kept; `loading` stays set until the last
    /// one settles.
    #[serde(skip)]
    in_flight: BTreeSet<RequestId>,
}

impl PrescriptionsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: PrescriptionsEvent) -> Applied {
        match event {
            PrescriptionsEvent::Create { request, phase } => match phase {
                RequestPhase::Pending => {
                    self.in_flight.insert(request);
                    self.loading = true;
                    self.error = None;
                }
                RequestPhase::Fulfilled(prescription) => {
                    self.settle(request);
                    self.prescriptions.push(prescription);
                }
                RequestPhase::Rejected(message) => {
                    self.settle(request);
                    self.error = Some(rejection_message(
                        message.as_deref(),
                        Operation::CreatePrescription.default_message(),
                    ));
                }
                RequestPhase::Abandoned => {
                    if !self.in_flight.contains(&request) {
                        return Applied::Ignored(IgnoreReason::StaleResponse);
                    }
                    self.settle(request);
                }
            },
            PrescriptionsEvent::ClearError => {
                if self.error.is_none() {
                    return Applied::Ignored(IgnoreReason::Unchanged);
                }
                self.error = None;
            }
        }
        Applied::Changed
    }

    fn settle(&mut self, request: RequestId) {
        self.in_flight.remove(&request);
        self.loading = !self.in_flight.is_empty();
    }

    pub fn creates_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Prescriptions written for one appointment, oldest first
    pub fn for_appointment(&self, appointment_id: &str) -> Vec<&Prescription> {
        self.prescriptions
            .iter()
            .filter(|p| p.appointment_id == appointment_id)
            .collect()
    }
}

/// Pure reducer: `(state, event) -> state`
pub fn reduce(mut state: PrescriptionsState, event: PrescriptionsEvent) -> PrescriptionsState {
    state.apply(event);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPrescription;

    fn prescription(appointment_id: &str, medicine: &str) -> Prescription {
        Prescription::issue(NewPrescription {
            appointment_id: appointment_id.to_string(),
            medicine_name: medicine.to_string(),
            dosage: "200mg".to_string(),
            instructions: String::new(),
        })
    }

    fn create(request: u64, phase: RequestPhase<Prescription>) -> PrescriptionsEvent {
        PrescriptionsEvent::Create {
            request: RequestId(request),
            phase,
        }
    }

    #[test]
    fn test_create_lifecycle_appends() {
        let rx = prescription("A1", "Ibuprofen");

        let state = reduce(PrescriptionsState::new(), create(1, RequestPhase::Pending));
        assert!(state.loading);

        let state = reduce(state, create(1, RequestPhase::Fulfilled(rx.clone())));
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.prescriptions, vec![rx]);
    }

    #[test]
    fn test_create_rejected_sets_default_error() {
        let state = reduce(PrescriptionsState::new(), create(1, RequestPhase::Pending));
        let state = reduce(state, create(1, RequestPhase::Rejected(None)));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to create prescription"));
        assert!(state.prescriptions.is_empty());
    }

    #[test]
    fn test_overlapping_creates_keep_loading_until_last() {
        let mut state = PrescriptionsState::new();
        state.apply(create(1, RequestPhase::Pending));
        state.apply(create(2, RequestPhase::Pending));

        state.apply(create(2, RequestPhase::Fulfilled(prescription("A1", "Second"))));
        assert!(state.loading);
        assert_eq!(state.creates_in_flight(), 1);

        state.apply(create(1, RequestPhase::Fulfilled(prescription("A1", "First"))));
        assert!(!state.loading);

        let names: Vec<_> = state
            .prescriptions
            .iter()
            .map(|p| p.medicine_name.as_str())
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn test_abandoned_create_releases_loading() {
        let mut state = PrescriptionsState::new();
        state.apply(create(1, RequestPhase::Pending));
        state.apply(create(2, RequestPhase::Pending));

        assert!(state.apply(create(1, RequestPhase::Abandoned)).is_changed());
        assert!(state.loading);

        state.apply(create(2, RequestPhase::Fulfilled(prescription("A1", "Ibuprofen"))));
        assert!(!state.loading);
        assert_eq!(state.creates_in_flight(), 0);
        assert!(state.error.is_none());
        assert_eq!(state.prescriptions.len(), 1);

        assert_eq!(
            state.apply(create(1, RequestPhase::Abandoned)),
            Applied::Ignored(IgnoreReason::StaleResponse)
        );
    }

    #[test]
    fn test_clear_without_error_is_unchanged() {
        let mut state = PrescriptionsState::new();
        assert_eq!(
            state.apply(PrescriptionsEvent::ClearError),
            Applied::Ignored(IgnoreReason::Unchanged)
        );
    }

    #[test]
    fn test_clear_error_leaves_rest() {
        let mut state = PrescriptionsState::new();
        state.apply(create(1, RequestPhase::Pending));
        state.apply(create(1, RequestPhase::Fulfilled(prescription("A1", "Ibuprofen"))));
        state.apply(create(2, RequestPhase::Pending));
        state.error = Some("Failed to create prescription".to_string());

        let cleared = reduce(state.clone(), PrescriptionsEvent::ClearError);
        assert!(cleared.error.is_none());
        assert_eq!(cleared.prescriptions, state.prescriptions);
        assert_eq!(cleared.loading, state.loading);

        let again = reduce(cleared.clone(), PrescriptionsEvent::ClearError);
        assert_eq!(again, cleared);
    }

    #[test]
    fn test_for_appointment_keeps_insertion_order() {
        let mut state = PrescriptionsState::new();
        let written = [("A1", "Ibuprofen"), ("A2", "Amoxicillin"), ("A1", "Omeprazole")];
        for (i, (appt, medicine)) in written.into_iter().enumerate() {
            let request = i as u64 + 1;
            state.apply(create(request, RequestPhase::Pending));
            state.apply(create(request, RequestPhase::Fulfilled(prescription(appt, medicine))));
        }

        let names: Vec<_> = state
            .for_appointment("A1")
            .iter()
            .map(|p| p.medicine_name.as_str())
            .collect();
        assert_eq!(names, vec!["Ibuprofen", "Omeprazole"]);
        assert!(state.for_appointment("nope").is_empty());
    }
}
