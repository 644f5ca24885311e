//! Clinic Store
//!
//! The owned container the presentation layer talks to. It keeps the
//! [`RootState`] inside a `watch` channel so every applied transition is
//! published as one atomic snapshot, and drives the async request lifecycle
//! against a [`ClinicDataSource`].
//!
//! ## Request lifecycle
//!
//! Each async action emits `Pending`, awaits the data source (the only
//! suspension point), then emits exactly one of `Fulfilled` / `Rejected`.
//! Fetches carry a [`RequestId`]; a response for anything but the newest
//! fetch is discarded. Creates are never discarded.
//!
//! There is no built-in timeout. Callers wrap calls in
//! `tokio::time::timeout` if they need one; dropping an action's future
//! before the data source answers settles its request as `Abandoned`, so
//! `loading` never outlives the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{ClinicError, Operation, Result};
use crate::model::{Appointment, AppointmentStatus, NewPrescription, Prescription, StatusFilter};
use crate::source::ClinicDataSource;
use crate::state::{
    rejection_message, Applied, AppointmentsEvent, IgnoreReason, PrescriptionsEvent, RequestId,
    RequestPhase, RootEvent, RootState, StatusUpdate,
};

/// Process-wide state container for appointments and prescriptions.
///
/// Construct one per application (or per test) and share it by reference
/// or `Arc`; there is no global instance.
pub struct ClinicStore {
    source: Arc<dyn ClinicDataSource>,
    state: watch::Sender<RootState>,
    last_request: AtomicU64,
}

impl ClinicStore {
    pub fn new(source: Arc<dyn ClinicDataSource>) -> Self {
        Self::with_state(source, RootState::default())
    }

    /// Start from an existing state tree (e.g. a preloaded schedule).
    pub fn with_state(source: Arc<dyn ClinicDataSource>, initial: RootState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            source,
            state,
            last_request: AtomicU64::new(0),
        }
    }

    // -------------------------------------------------------------------------
    // Outbound state
    // -------------------------------------------------------------------------

    /// Copy of the current state tree
    pub fn snapshot(&self) -> RootState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every applied transition
    pub fn subscribe(&self) -> watch::Receiver<RootState> {
        self.state.subscribe()
    }

    /// Read the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&RootState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Apply one event. Subscribers are notified only if state changed.
    pub(crate) fn dispatch(&self, event: impl Into<RootEvent>) -> Applied {
        let event = event.into();
        let mut applied = Applied::Changed;
        self.state.send_if_modified(|state| {
            applied = state.apply(event);
            applied.is_changed()
        });
        applied
    }

    fn next_request(&self) -> RequestId {
        RequestId(self.last_request.fetch_add(1, Ordering::Relaxed) + 1)
    }

    // -------------------------------------------------------------------------
    // Inbound actions
    // -------------------------------------------------------------------------

    /// Load the day's schedule, replacing the current list.
    ///
    /// The returned error mirrors what was recorded in state. A response
    /// superseded by a newer fetch is still returned to its caller but not
    /// applied.
    pub async fn fetch_appointments(&self) -> Result<Vec<Appointment>> {
        let request = self.next_request();
        tracing::info!(%request, "Fetching appointments");
        let in_flight = InFlight::start(
            self,
            request,
            AppointmentsEvent::Fetch {
                request,
                phase: RequestPhase::Pending,
            }
            .into(),
            |request| {
                RootEvent::from(AppointmentsEvent::Fetch {
                    request,
                    phase: RequestPhase::Abandoned,
                })
            },
        );

        let result = self.source.fetch_appointments().await;

        let outcome = match &result {
            Ok(appointments) => {
                tracing::info!(%request, count = appointments.len(), "Appointments loaded");
                RequestPhase::Fulfilled(appointments.clone())
            }
            Err(err) => {
                tracing::warn!(%request, error = %err, "Appointment fetch failed");
                RequestPhase::Rejected(err.message().map(str::to_string))
            }
        };

        if let Applied::Ignored(IgnoreReason::StaleResponse) =
            in_flight.finish(AppointmentsEvent::Fetch {
                request,
                phase: outcome,
            })
        {
            tracing::debug!(%request, "Discarded response from superseded fetch");
        }

        result.map_err(|err| ClinicError::Request {
            operation: Operation::FetchAppointments,
            message: rejection_message(
                err.message(),
                Operation::FetchAppointments.default_message(),
            ),
        })
    }

    /// Change the list filter.
    pub fn set_filter(&self, filter: StatusFilter) {
        tracing::debug!(%filter, "Filter changed");
        self.dispatch(AppointmentsEvent::SetFilter(filter));
    }

    /// Set an appointment's status. Unknown ids change nothing and record no
    /// error; the outcome tells the caller which case happened.
    pub fn update_appointment_status(&self, id: &str, status: AppointmentStatus) -> StatusUpdate {
        let mut outcome = StatusUpdate::NotFound;
        self.state.send_if_modified(|state| {
            outcome = state.appointments.update_status(id, status);
            outcome.is_found()
        });

        match outcome {
            StatusUpdate::Updated { previous } => {
                tracing::info!(id, %previous, %status, "Appointment status updated");
            }
            StatusUpdate::NotFound => {
                tracing::debug!(id, %status, "Status update for unknown appointment ignored");
            }
        }
        outcome
    }

    /// Record a prescription and append it to the list.
    ///
    /// Input is expected to be validated already (see
    /// [`crate::validation::PrescriptionDraft`]). On failure the error is
    /// kept in state and also returned, so the caller can leave its form
    /// populated.
    pub async fn create_prescription(&self, data: NewPrescription) -> Result<Prescription> {
        let request = self.next_request();
        tracing::info!(
            %request,
            appointment_id = %data.appointment_id,
            medicine = %data.medicine_name,
            "Creating prescription"
        );
        let in_flight = InFlight::start(
            self,
            request,
            PrescriptionsEvent::Create {
                request,
                phase: RequestPhase::Pending,
            }
            .into(),
            |request| {
                RootEvent::from(PrescriptionsEvent::Create {
                    request,
                    phase: RequestPhase::Abandoned,
                })
            },
        );

        let result = self.source.create_prescription(data).await;
        in_flight.finish(PrescriptionsEvent::Create {
            request,
            phase: RequestPhase::settle(result.clone()),
        });

        match result {
            Ok(prescription) => {
                tracing::info!(%request, id = %prescription.id, "Prescription created");
                Ok(prescription)
            }
            Err(err) => {
                tracing::warn!(%request, error = %err, "Prescription create failed");
                Err(ClinicError::Request {
                    operation: Operation::CreatePrescription,
                    message: rejection_message(
                        err.message(),
                        Operation::CreatePrescription.default_message(),
                    ),
                })
            }
        }
    }

    /// Dismiss the prescription error.
    pub fn clear_prescription_error(&self) {
        self.dispatch(PrescriptionsEvent::ClearError);
    }
}

/// An issued request that has not settled yet.
///
/// Dispatched `Pending` on start. If dropped before [`InFlight::finish`]
/// (the action future was cancelled mid-await), it dispatches the
/// `Abandoned` event instead.
struct InFlight<'a> {
    store: &'a ClinicStore,
    request: RequestId,
    abandon: fn(RequestId) -> RootEvent,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn start(
        store: &'a ClinicStore,
        request: RequestId,
        pending: RootEvent,
        abandon: fn(RequestId) -> RootEvent,
    ) -> Self {
        store.dispatch(pending);
        Self {
            store,
            request,
            abandon,
            settled: false,
        }
    }

    fn finish(mut self, event: impl Into<RootEvent>) -> Applied {
        self.settled = true;
        self.store.dispatch(event)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!(
                request = %self.request,
                "Request dropped before the data source answered"
            );
            self.store.dispatch((self.abandon)(self.request));
        }
    }
}
