//! Data Source
//!
//! The narrow boundary the store loads and saves through. `MockDataSource`
//! serves fixed data after a simulated delay; a real API client implements
//! the same trait and drops in without any change to the store.

pub mod mock;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::{Appointment, NewPrescription, Prescription};

pub use mock::{daily_schedule, MockDataSource};

pub type SourceResult<T> = std::result::Result<T, SourceError>;

#[async_trait]
pub trait ClinicDataSource: Send + Sync {
    /// Load the day's appointments, in schedule order.
    async fn fetch_appointments(&self) -> SourceResult<Vec<Appointment>>;

    /// Record a prescription. The source assigns the id and creation time.
    async fn create_prescription(&self, data: NewPrescription) -> SourceResult<Prescription>;
}
