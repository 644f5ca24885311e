//! Root State
//!
//! Combines the appointments and prescriptions namespaces into the single
//! tree the presentation layer reads. Events are routed to the namespace
//! that owns them; no event touches both.

use serde::Serialize;

use super::appointments::{AppointmentsEvent, AppointmentsState};
use super::lifecycle::Applied;
use super::prescriptions::{PrescriptionsEvent, PrescriptionsState};

/// Snapshot of the whole store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootState {
    pub appointments: AppointmentsState,
    pub prescriptions: PrescriptionsState,
}

/// Event addressed to one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootEvent {
    Appointments(AppointmentsEvent),
    Prescriptions(PrescriptionsEvent),
}

impl From<AppointmentsEvent> for RootEvent {
    fn from(event: AppointmentsEvent) -> Self {
        RootEvent::Appointments(event)
    }
}

impl From<PrescriptionsEvent> for RootEvent {
    fn from(event: PrescriptionsEvent) -> Self {
        RootEvent::Prescriptions(event)
    }
}

impl RootState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: RootEvent) -> Applied {
        match event {
            RootEvent::Appointments(event) => self.appointments.apply(event),
            RootEvent::Prescriptions(event) => self.prescriptions.apply(event),
        }
    }

    /// Whether any request in either namespace is outstanding
    pub fn is_loading(&self) -> bool {
        self.appointments.loading || self.prescriptions.loading
    }
}

/// Pure reducer: `(state, event) -> state`
pub fn reduce(mut state: RootState, event: RootEvent) -> RootState {
    state.apply(event);
    state
}
