//! Helpers shared by route handlers.

use chrono::{DateTime, FixedOffset};
use common::format_validation_errors;
use util::{clock, config};
use validator::Validate;

use crate::response::ApiError;

/// The current wall-clock time in the configured attendance time zone.
pub fn local_now() -> DateTime<FixedOffset> {
    clock::local_now(config::timezone_offset_minutes())
}

/// Runs derive-based validation, turning failures into a 400.
pub fn validate<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate()
        .map_err(|errors| ApiError::bad_request(format_validation_errors(&errors)))
}
