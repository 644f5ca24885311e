//! Domain Model
//!
//! Appointment and prescription records as the store holds them.

pub mod appointment;
pub mod prescription;

pub use appointment::*;
pub use prescription::*;
