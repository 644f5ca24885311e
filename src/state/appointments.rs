//! Appointments State
//!
//! The daily schedule, the active status filter, and the fetch lifecycle.

use serde::Serialize;

use super::lifecycle::{rejection_message, Applied, IgnoreReason, RequestId, RequestPhase};
use crate::error::Operation;
use crate::model::{Appointment, AppointmentStatus, StatusFilter};

/// Events handled by the appointments reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentsEvent {
    /// Progress of a schedule fetch
    Fetch {
        request: RequestId,
        phase: RequestPhase<Vec<Appointment>>,
    },

    /// Change the list filter
    SetFilter(StatusFilter),

    /// Change one appointment's status
    UpdateStatus {
        id: String,
        status: AppointmentStatus,
    },
}

/// Outcome of a status update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    Updated { previous: AppointmentStatus },
    NotFound,
}

impl StatusUpdate {
    pub fn is_found(&self) -> bool {
        matches!(self, StatusUpdate::Updated { .. })
    }
}

/// Appointment namespace of the root state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppointmentsState {
    pub appointments: Vec<Appointment>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: StatusFilter,

    /// Newest fetch still awaiting its response
    #[serde(skip)]
    latest_fetch: Option<RequestId>,
}

/// Appointment count per status, over the unfiltered list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.scheduled + self.completed + self.cancelled
    }

    pub fn get(&self, status: AppointmentStatus) -> usize {
        match status {
            AppointmentStatus::Scheduled => self.scheduled,
            AppointmentStatus::Completed => self.completed,
            AppointmentStatus::Cancelled => self.cancelled,
        }
    }

    /// Number of rows the list shows under `filter`
    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        filter.status().map_or(self.total(), |s| self.get(s))
    }
}

/// One entry of the filter bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub filter: StatusFilter,
    pub label: &'static str,
    pub count: usize,
    pub active: bool,
}

impl AppointmentsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with an already loaded schedule
    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments,
            ..Self::default()
        }
    }

    /// Apply an event in place.
    pub fn apply(&mut self, event: AppointmentsEvent) -> Applied {
        match event {
            AppointmentsEvent::Fetch { request, phase } => self.apply_fetch(request, phase),
            AppointmentsEvent::SetFilter(filter) if filter == self.filter => {
                Applied::Ignored(IgnoreReason::Unchanged)
            }
            AppointmentsEvent::SetFilter(filter) => {
                self.filter = filter;
                Applied::Changed
            }
            AppointmentsEvent::UpdateStatus { id, status } => {
                match self.update_status(&id, status) {
                    StatusUpdate::Updated { .. } => Applied::Changed,
                    StatusUpdate::NotFound => Applied::Ignored(IgnoreReason::UnknownAppointment),
                }
            }
        }
    }

    fn apply_fetch(
        &mut self,
        request: RequestId,
        phase: RequestPhase<Vec<Appointment>>,
    ) -> Applied {
        match phase {
            RequestPhase::Pending => {
                if self.latest_fetch.is_some_and(|latest| request < latest) {
                    return Applied::Ignored(IgnoreReason::StaleResponse);
                }
                self.latest_fetch = Some(request);
                self.loading = true;
                self.error = None;
            }
            RequestPhase::Fulfilled(appointments) => {
                if self.latest_fetch != Some(request) {
                    return Applied::Ignored(IgnoreReason::StaleResponse);
                }
                self.latest_fetch = None;
                self.loading = false;
                self.appointments = appointments;
            }
            RequestPhase::Rejected(message) => {
                if self.latest_fetch != Some(request) {
                    return Applied::Ignored(IgnoreReason::StaleResponse);
                }
                self.latest_fetch = None;
                self.loading = false;
                self.error = Some(rejection_message(
                    message.as_deref(),
                    Operation::FetchAppointments.default_message(),
                ));
            }
            RequestPhase::Abandoned => {
                if self.latest_fetch != Some(request) {
                    return Applied::Ignored(IgnoreReason::StaleResponse);
                }
                self.latest_fetch = None;
                self.loading = false;
            }
        }
        Applied::Changed
    }

    /// Set the status of the appointment with `id`. Unknown ids leave the
    /// list untouched.
    pub fn update_status(&mut self, id: &str, status: AppointmentStatus) -> StatusUpdate {
        match self.appointments.iter_mut().find(|a| a.id == id) {
            Some(appointment) => {
                let previous = appointment.status;
                appointment.status = status;
                StatusUpdate::Updated { previous }
            }
            None => StatusUpdate::NotFound,
        }
    }

    /// Whether a fetch is outstanding
    pub fn fetch_in_flight(&self) -> Option<RequestId> {
        self.latest_fetch
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    /// Appointments passing the current filter, in schedule order
    pub fn visible(&self) -> Vec<&Appointment> {
        self.filtered(self.filter)
    }

    pub fn filtered(&self, filter: StatusFilter) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| filter.matches(a.status))
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        self.appointments
            .iter()
            .fold(StatusCounts::default(), |mut counts, a| {
                match a.status {
                    AppointmentStatus::Scheduled => counts.scheduled += 1,
                    AppointmentStatus::Completed => counts.completed += 1,
                    AppointmentStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            })
    }

    pub fn find(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Filter bar entries in display order
    pub fn filter_options(&self) -> Vec<FilterOption> {
        let counts = self.counts();
        StatusFilter::ALL
            .iter()
            .map(|&filter| FilterOption {
                filter,
                label: filter.label(),
                count: counts.for_filter(filter),
                active: filter == self.filter,
            })
            .collect()
    }
}

/// Pure reducer: `(state, event) -> state`
pub fn reduce(mut state: AppointmentsState, event: AppointmentsEvent) -> AppointmentsState {
    state.apply(event);
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(id: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: id.to_string(),
            patient_name: format!("Patient {}", id),
            age: 30,
            symptoms: "Headache".to_string(),
            time: "09:00 AM".to_string(),
            date: "2024-01-15".to_string(),
            phone: "+1 (555) 000-0000".to_string(),
            email: format!("patient{}@example.com", id),
            status,
            notes: None,
        }
    }

    fn seeded() -> AppointmentsState {
        use AppointmentStatus::*;
        AppointmentsState::with_appointments(vec![
            appointment("1", Scheduled),
            appointment("2", Scheduled),
            appointment("3", Completed),
            appointment("4", Scheduled),
            appointment("5", Cancelled),
        ])
    }

    fn fetch(request: u64, phase: RequestPhase<Vec<Appointment>>) -> AppointmentsEvent {
        AppointmentsEvent::Fetch {
            request: RequestId(request),
            phase,
        }
    }

    #[test]
    fn test_pending_sets_loading_and_clears_error() {
        let mut state = AppointmentsState::new();
        state.error = Some("old".to_string());

        let state = reduce(state, fetch(1, RequestPhase::Pending));
        assert!(state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.fetch_in_flight(), Some(RequestId(1)));
    }

    #[test]
    fn test_fulfilled_replaces_collection() {
        let state = seeded();
        let fresh = vec![appointment("9", AppointmentStatus::Completed)];

        let state = reduce(state, fetch(1, RequestPhase::Pending));
        let state = reduce(state, fetch(1, RequestPhase::Fulfilled(fresh.clone())));

        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.appointments, fresh);
        assert_eq!(state.fetch_in_flight(), None);
    }

    #[test]
    fn test_rejected_uses_default_message() {
        let state = reduce(AppointmentsState::new(), fetch(1, RequestPhase::Pending));
        let state = reduce(state, fetch(1, RequestPhase::Rejected(None)));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch appointments"));
    }

    #[test]
    fn test_rejected_keeps_source_message() {
        let state = reduce(AppointmentsState::new(), fetch(1, RequestPhase::Pending));
        let state = reduce(
            state,
            fetch(1, RequestPhase::Rejected(Some("Network down".to_string()))),
        );
        assert_eq!(state.error.as_deref(), Some("Network down"));
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut state = AppointmentsState::new();
        state.apply(fetch(1, RequestPhase::Pending));
        state.apply(fetch(2, RequestPhase::Pending));

        let stale = state.apply(fetch(
            1,
            RequestPhase::Fulfilled(vec![appointment("old", AppointmentStatus::Scheduled)]),
        ));
        assert_eq!(stale, Applied::Ignored(IgnoreReason::StaleResponse));
        assert!(state.loading);
        assert!(state.appointments.is_empty());

        let fresh = state.apply(fetch(
            2,
            RequestPhase::Fulfilled(vec![appointment("new", AppointmentStatus::Scheduled)]),
        ));
        assert!(fresh.is_changed());
        assert!(!state.loading);
        assert_eq!(state.appointments[0].id, "new");
    }

    #[test]
    fn test_abandoned_fetch_stops_loading_and_keeps_list() {
        let mut state = seeded();
        state.apply(fetch(1, RequestPhase::Pending));

        let applied = state.apply(fetch(1, RequestPhase::Abandoned));

        assert!(applied.is_changed());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.fetch_in_flight(), None);
        assert_eq!(state.appointments, seeded().appointments);
    }

    #[test]
    fn test_abandoned_superseded_fetch_is_ignored() {
        let mut state = AppointmentsState::new();
        state.apply(fetch(1, RequestPhase::Pending));
        state.apply(fetch(2, RequestPhase::Pending));

        let applied = state.apply(fetch(1, RequestPhase::Abandoned));

        assert_eq!(applied, Applied::Ignored(IgnoreReason::StaleResponse));
        assert!(state.loading);
        assert_eq!(state.fetch_in_flight(), Some(RequestId(2)));
    }

    #[test]
    fn test_update_status_changes_only_target() {
        let mut state = seeded();
        let before = state.appointments.clone();

        let outcome = state.update_status("2", AppointmentStatus::Cancelled);
        assert_eq!(
            outcome,
            StatusUpdate::Updated {
                previous: AppointmentStatus::Scheduled
            }
        );

        for (old, new) in before.iter().zip(&state.appointments) {
            if old.id == "2" {
                assert_eq!(new.status, AppointmentStatus::Cancelled);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let state = seeded();
        let mut updated = state.clone();

        let applied = updated.apply(AppointmentsEvent::UpdateStatus {
            id: "missing".to_string(),
            status: AppointmentStatus::Completed,
        });

        assert_eq!(applied, Applied::Ignored(IgnoreReason::UnknownAppointment));
        assert_eq!(updated, state);
        assert!(updated.error.is_none());
    }

    #[test]
    fn test_filter_views() {
        let state = reduce(seeded(), AppointmentsEvent::SetFilter(StatusFilter::Completed));
        let ids: Vec<_> = state.visible().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);

        let state = reduce(state, AppointmentsEvent::SetFilter(StatusFilter::All));
        assert_eq!(state.visible().len(), 5);
    }

    #[test]
    fn test_same_filter_is_unchanged() {
        let mut state = seeded();
        assert_eq!(
            state.apply(AppointmentsEvent::SetFilter(StatusFilter::All)),
            Applied::Ignored(IgnoreReason::Unchanged)
        );
        assert!(state
            .apply(AppointmentsEvent::SetFilter(StatusFilter::Scheduled))
            .is_changed());
    }

    #[test]
    fn test_schedule_scenario() {
        let state = reduce(seeded(), AppointmentsEvent::SetFilter(StatusFilter::Scheduled));
        assert_eq!(state.visible().len(), 3);

        let first = state.visible()[0].id.clone();
        let state = reduce(
            state,
            AppointmentsEvent::UpdateStatus {
                id: first,
                status: AppointmentStatus::Completed,
            },
        );

        assert_eq!(state.visible().len(), 2);
        assert_eq!(state.counts().completed, 2);
    }

    #[test]
    fn test_filter_options() {
        let state = reduce(seeded(), AppointmentsEvent::SetFilter(StatusFilter::Cancelled));
        let options = state.filter_options();

        let summary: Vec<_> = options
            .iter()
            .map(|o| (o.label, o.count, o.active))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("All", 5, false),
                ("Scheduled", 3, false),
                ("Completed", 1, false),
                ("Cancelled", 1, true),
            ]
        );
    }

    #[test]
    fn test_find() {
        let state = seeded();
        assert_eq!(state.find("4").map(|a| a.status), Some(AppointmentStatus::Scheduled));
        assert!(state.find("40").is_none());
    }
}
