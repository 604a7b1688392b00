//! Attendance domain logic: the active-course tracker, the marking engine,
//! ledger maintenance, credentials and reports.
//!
//! Every operation takes its database connection explicitly and returns
//! [`error::AppError`]; nothing here knows about HTTP.

pub mod active_session;
pub mod attendance_ledger;
pub mod attendance_marking;
pub mod error;
pub mod events;
pub mod reports;
pub mod user_service;

pub use error::AppError;
