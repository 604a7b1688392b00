//! Outbound notifications for live dashboards.
//!
//! Delivery is best effort: [`publish`] logs a failed delivery and moves on,
//! so a notifier can never fail the operation that produced the event.

use std::future::Future;

use db::models::attendance_record::Model as AttendanceRecord;
use serde::Serialize;
use tracing::warn;

/// Topic every attendance event is published on.
pub const ATTENDANCE_TOPIC: &str = "attendance";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseChanged {
    /// Empty in general mode.
    pub course: String,
    pub mode: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceCount {
    pub course: String,
    pub count: u64,
    pub date: String,
}

/// Serializes as the bare payload; the event name travels separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttendanceEvent {
    CourseChanged(CourseChanged),
    NewAttendance(AttendanceRecord),
    AttendanceCount(AttendanceCount),
}

impl AttendanceEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CourseChanged(_) => "course_changed",
            Self::NewAttendance(_) => "new_attendance",
            Self::AttendanceCount(_) => "attendance_count",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Port through which domain operations announce state changes.
pub trait AttendanceNotifier: Send + Sync {
    fn publish(&self, event: AttendanceEvent) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Publishes `event`, logging instead of returning any failure.
pub async fn publish<N: AttendanceNotifier>(notifier: &N, event: AttendanceEvent) {
    let name = event.name();
    if let Err(err) = notifier.publish(event).await {
        warn!(event = name, error = %err, "attendance notification dropped");
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl AttendanceNotifier for NoopNotifier {
    async fn publish(&self, _event: AttendanceEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}
