//! Mock data source with simulated latency.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{ClinicDataSource, SourceResult};
use crate::config::ClinicConfig;
use crate::error::{Result, SourceError};
use crate::model::{Appointment, AppointmentStatus, NewPrescription, Prescription};

/// In-memory data source.
///
/// Sleeps for the configured delay, then returns the fixture schedule or a
/// freshly issued prescription. Failures can be scripted per operation;
/// a scripted failure stays in effect until cleared.
pub struct MockDataSource {
    fetch_delay: Duration,
    create_delay: Duration,
    appointments: Vec<Appointment>,
    failures: Mutex<ScriptedFailures>,
    fetch_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

#[derive(Default)]
struct ScriptedFailures {
    fetch: Option<SourceError>,
    create: Option<SourceError>,
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::from_config(&ClinicConfig::default())
    }
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ClinicConfig) -> Self {
        Self {
            fetch_delay: config.fetch_delay,
            create_delay: config.create_delay,
            appointments: daily_schedule(),
            failures: Mutex::new(ScriptedFailures::default()),
            fetch_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Mock with delays read from the environment (see
    /// [`ClinicConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        let config = ClinicConfig::from_env()?;
        tracing::debug!(?config, "Mock data source configured");
        Ok(Self::from_config(&config))
    }

    /// Serve `appointments` instead of the built-in schedule.
    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.appointments = appointments;
        self
    }

    /// Make every fetch fail until cleared with `None`.
    pub fn set_fetch_failure(&self, failure: Option<SourceError>) {
        self.failures().fetch = failure;
    }

    /// Make every create fail until cleared with `None`.
    pub fn set_create_failure(&self, failure: Option<SourceError>) {
        self.failures().create = failure;
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::Relaxed)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::Relaxed)
    }

    fn failures(&self) -> std::sync::MutexGuard<'_, ScriptedFailures> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ClinicDataSource for MockDataSource {
    async fn fetch_appointments(&self) -> SourceResult<Vec<Appointment>> {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
        tokio::time::sleep(self.fetch_delay).await;

        let failure = self.failures().fetch.clone();
        if let Some(err) = failure {
            return Err(err);
        }
        Ok(self.appointments.clone())
    }

    async fn create_prescription(&self, data: NewPrescription) -> SourceResult<Prescription> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        tokio::time::sleep(self.create_delay).await;

        let failure = self.failures().create.clone();
        if let Some(err) = failure {
            return Err(err);
        }
        Ok(Prescription::issue(data))
    }
}

/// The fixture schedule served by the mock: five patients on 2024-01-15,
/// three scheduled, one completed, one cancelled.
pub fn daily_schedule() -> Vec<Appointment> {
    use AppointmentStatus::*;

    let rows: [(&str, &str, u32, &str, &str, &str, &str, AppointmentStatus, &str); 5] = [
        (
            "1",
            "Sarah Johnson",
            34,
            "Persistent headaches, dizziness",
            "09:00 AM",
            "+1 (555) 123-4567",
            "sarah.johnson@email.com",
            Scheduled,
            "Patient reports headaches for the past week",
        ),
        (
            "2",
            "Michael Chen",
            28,
            "Chest pain, shortness of breath",
            "10:30 AM",
            "+1 (555) 987-6543",
            "michael.chen@email.com",
            Scheduled,
            "Urgent consultation needed",
        ),
        (
            "3",
            "Emma Williams",
            45,
            "Joint pain, fatigue",
            "02:00 PM",
            "+1 (555) 456-7890",
            "emma.williams@email.com",
            Completed,
            "Follow-up appointment required",
        ),
        (
            "4",
            "David Rodriguez",
            52,
            "High blood pressure, routine check",
            "03:30 PM",
            "+1 (555) 321-0987",
            "david.rodriguez@email.com",
            Scheduled,
            "Regular monthly check-up",
        ),
        (
            "5",
            "Lisa Anderson",
            31,
            "Skin rash, itching",
            "04:45 PM",
            "+1 (555) 654-3210",
            "lisa.anderson@email.com",
            Cancelled,
            "Patient cancelled due to emergency",
        ),
    ];

    rows.into_iter()
        .map(
            |(id, name, age, symptoms, time, phone, email, status, notes)| Appointment {
                id: id.to_string(),
                patient_name: name.to_string(),
                age,
                symptoms: symptoms.to_string(),
                time: time.to_string(),
                date: "2024-01-15".to_string(),
                phone: phone.to_string(),
                email: email.to_string(),
                status,
                notes: Some(notes.to_string()),
            },
        )
        .collect()
}
