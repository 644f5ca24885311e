//! Application State Module
//!
//! Pure state for the two store namespaces. Every transition is an event
//! applied by a reducer; nothing here performs IO or awaits.
//!
//! - **lifecycle**: Request phases and request tokens
//! - **appointments**: Schedule list, filter, fetch lifecycle
//! - **prescriptions**: Prescription list, create lifecycle
//! - **root**: The combined state tree and event routing
//!
//! Each namespace module has its own `reduce`; `state::reduce` is the root one.

pub mod appointments;
pub mod lifecycle;
pub mod prescriptions;
pub mod root;

pub use appointments::{
    AppointmentsEvent, AppointmentsState, FilterOption, StatusCounts, StatusUpdate,
};
pub use lifecycle::{rejection_message, Applied, IgnoreReason, RequestId, RequestPhase};
pub use prescriptions::{PrescriptionsEvent, PrescriptionsState};
pub use root::{reduce, RootEvent, RootState};
