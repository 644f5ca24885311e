//! Request Lifecycle
//!
//! Async operations are reflected in state as three explicit phases. The
//! store emits `Pending` before awaiting the data source and exactly one of
//! `Fulfilled` / `Rejected` after, or `Abandoned` if the caller drops the
//! request before the data source answers.

use serde::Serialize;

use crate::error::SourceError;

/// Token identifying one async request.
///
/// Issued in increasing order by the store; reducers compare tokens to
/// recognise responses that a newer request has superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Phase of an async request as seen by a reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPhase<T> {
    /// Request issued, response outstanding
    Pending,
    /// Request succeeded with a value
    Fulfilled(T),
    /// Request failed; the message may be missing
    Rejected(Option<String>),
    /// Caller stopped waiting; no response will arrive
    Abandoned,
}

impl<T> RequestPhase<T> {
    /// Settle from a data source result
    pub fn settle(result: Result<T, SourceError>) -> Self {
        match result {
            Ok(value) => RequestPhase::Fulfilled(value),
            Err(err) => RequestPhase::Rejected(err.message().map(str::to_string)),
        }
    }
}

/// Rejection message as recorded in state: the given text, or `default`
/// when it is missing or blank.
pub fn rejection_message(message: Option<&str>, default: &str) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => default.to_string(),
    }
}

/// Result of applying one event to state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// State was updated
    Changed,
    /// Event was dropped without touching state
    Ignored(IgnoreReason),
}

impl Applied {
    pub fn is_changed(&self) -> bool {
        matches!(self, Applied::Changed)
    }
}

/// Why an event was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Response for a request that a newer one superseded
    StaleResponse,
    /// Status update for an id not in the appointment list
    UnknownAppointment,
    /// Event would leave the value as it already is
    Unchanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_from_source_result() {
        let ok: RequestPhase<u8> = RequestPhase::settle(Ok(3));
        assert_eq!(ok, RequestPhase::Fulfilled(3));

        let err: RequestPhase<u8> = RequestPhase::settle(Err(SourceError::Unspecified));
        assert_eq!(err, RequestPhase::Rejected(None));
    }

    #[test]
    fn test_rejection_message_falls_back() {
        assert_eq!(rejection_message(Some("boom"), "default"), "boom");
        assert_eq!(rejection_message(Some(""), "default"), "default");
        assert_eq!(rejection_message(None, "default"), "default");
    }

    #[test]
    fn test_request_ids_order() {
        let first = RequestId(1);
        assert!(RequestId(2) > first);
        assert_eq!(first.to_string(), "req-1");
    }
}
