//! Appointment Types
//!
//! One row of the doctor's daily schedule, its status, and the filter the
//! schedule list is narrowed by.

use serde::{Deserialize, Serialize};

/// Status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Badge label shown next to the patient name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filter applied to the appointment list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Scheduled,
    Completed,
    Cancelled,
}

impl StatusFilter {
    /// Display order of the filter bar
    pub const ALL: [StatusFilter; 4] = [
        Self::All,
        Self::Scheduled,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// The status this filter selects, `None` for `All`
    pub fn status(&self) -> Option<AppointmentStatus> {
        match self {
            Self::All => None,
            Self::Scheduled => Some(AppointmentStatus::Scheduled),
            Self::Completed => Some(AppointmentStatus::Completed),
            Self::Cancelled => Some(AppointmentStatus::Cancelled),
        }
    }

    pub fn matches(&self, status: AppointmentStatus) -> bool {
        self.status().map_or(true, |s| s == status)
    }

    /// Text shown when nothing passes the filter
    pub fn empty_message(&self) -> String {
        match self {
            Self::All => "No appointments scheduled for today".to_string(),
            other => format!("No {} appointments", other.as_str()),
        }
    }
}

impl From<AppointmentStatus> for StatusFilter {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Scheduled => Self::Scheduled,
            AppointmentStatus::Completed => Self::Completed,
            AppointmentStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single appointment on the daily schedule.
///
/// Only `status` changes after the record is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    pub age: u32,
    pub symptoms: String,
    /// Display time, e.g. "09:00 AM"
    pub time: String,
    /// ISO date, e.g. "2024-01-15"
    pub date: String,
    pub phone: String,
    pub email: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    /// Whether the detail view offers "mark complete" / "cancel"
    pub fn is_actionable(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }
}
