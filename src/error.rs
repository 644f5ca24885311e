//! Error types for the clinic store
//!
//! Data source failures are normalized into messages at the store boundary.
//! The typed errors here are what callers branch on.

use thiserror::Error;

/// Crate-level result alias
pub type Result<T> = std::result::Result<T, ClinicError>;

/// Top-level error returned by store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    #[error("{operation} failed: {message}")]
    Request {
        operation: Operation,
        message: String,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClinicError {
    /// The user-facing message, without the operation prefix
    pub fn message(&self) -> String {
        match self {
            ClinicError::Request { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Async operations that can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchAppointments,
    CreatePrescription,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchAppointments => "fetch_appointments",
            Self::CreatePrescription => "create_prescription",
        }
    }

    /// Message recorded in state when the source gives none
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::FetchAppointments => "Failed to fetch appointments",
            Self::CreatePrescription => "Failed to create prescription",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure reported by a data source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("{0}")]
    Message(String),

    #[error("data source failed without a message")]
    Unspecified,
}

impl SourceError {
    pub fn message(&self) -> Option<&str> {
        match self {
            SourceError::Message(m) if !m.trim().is_empty() => Some(m),
            _ => None,
        }
    }
}

impl From<String> for SourceError {
    fn from(message: String) -> Self {
        SourceError::Message(message)
    }
}

impl From<&str> for SourceError {
    fn from(message: &str) -> Self {
        SourceError::Message(message.to_string())
    }
}

/// Prescription form errors, raised before anything is dispatched
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in medicine name and dosage")]
    MissingMedicineName,

    #[error("Please fill in medicine name and dosage")]
    MissingDosage,
}

/// Invalid configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a whole number of milliseconds, got '{value}'")]
    InvalidNumber { key: String, value: String },
}
