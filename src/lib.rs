//! Clinic Store - appointment and prescription state core
//!
//! Holds the doctor's daily appointment list and the prescriptions written
//! during those appointments. All mutation goes through [`ClinicStore`],
//! which runs requests against a pluggable [`ClinicDataSource`] and
//! publishes [`RootState`] snapshots to the presentation layer.
//!
//! ## Structure
//!
//! - **model**: Appointment, Prescription and the status/filter enums
//! - **state**: Pure reducers and derived views for both namespaces
//! - **store**: The owned container that drives the async request lifecycle
//! - **source**: Data source trait and the mock implementation
//! - **validation**: Prescription form checks done before dispatch

pub mod config;
pub mod error;
pub mod model;
pub mod source;
pub mod state;
pub mod store;
pub mod validation;

pub use config::ClinicConfig;
pub use error::{ClinicError, Result};
pub use model::{
    Appointment, AppointmentStatus, NewPrescription, Prescription, StatusFilter,
};
pub use source::{ClinicDataSource, MockDataSource};
pub use state::{
    Applied, AppointmentsState, PrescriptionsState, RequestId, RequestPhase, RootEvent, RootState,
    StatusCounts, StatusUpdate,
};
pub use store::ClinicStore;
pub use validation::PrescriptionDraft;
