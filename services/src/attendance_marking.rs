//! Turns one QR scan into at most two ledger rows.
//!
//! Every valid scan gets a `General` row for the day; when a course is
//! active it also gets a row for that course. Both rows are written in one
//! transaction and re-scans are absorbed by the ledger's unique index, so
//! the engine itself keeps no state between calls.

use chrono::{DateTime, FixedOffset};
use db::models::active_course;
use db::models::attendance_record::{Model as AttendanceRecord, NewRecord, GENERAL_COURSE};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use tracing::{info, warn};
use util::clock;

use crate::error::AppError;
use crate::events::{self, AttendanceCount, AttendanceEvent, AttendanceNotifier};

pub const INVALID_PAYLOAD: &str = "Invalid QR content (expected 'id|name')";
pub const GENERAL_RECORDED: &str = "✅ General attendance recorded.";
pub const GENERAL_ALREADY_RECORDED: &str = "⚠️ General attendance already recorded today.";

pub fn course_recorded(course: &str) -> String {
    format!("✅ Course attendance recorded for '{course}'.")
}

pub fn course_already_recorded(course: &str) -> String {
    format!("⚠️ Course attendance already recorded for '{course}'.")
}

/// A decoded `"<studentId>|<name>"` QR payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPayload {
    pub student_id: String,
    pub name: String,
}

impl ScanPayload {
    /// Splits on the first `|` and trims both halves. Either half being
    /// empty is as invalid as a missing separator.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let (id, name) = raw
            .trim()
            .split_once('|')
            .ok_or_else(|| AppError::validation(INVALID_PAYLOAD))?;

        let (id, name) = (id.trim(), name.trim());
        if id.is_empty() || name.is_empty() {
            return Err(AppError::validation(INVALID_PAYLOAD));
        }

        Ok(Self {
            student_id: id.to_owned(),
            name: name.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkOutcome {
    pub success: bool,
    /// General first, then the course message if a course is active.
    pub messages: Vec<String>,
    pub inserted: Vec<AttendanceRecord>,
}

pub struct AttendanceMarkingService;

impl AttendanceMarkingService {
    /// Records attendance for `raw` at `now`.
    ///
    /// A malformed payload is rejected before storage is touched and
    /// produces no notification. Notifications go out only after the
    /// transaction has committed.
    pub async fn mark<N: AttendanceNotifier>(
        db: &DatabaseConnection,
        notifier: &N,
        raw: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<MarkOutcome, AppError> {
        let scan = ScanPayload::parse(raw)?;
        let date = clock::date_string(&now);
        let time = clock::time_string(&now);

        let mut messages = Vec::with_capacity(2);
        let mut inserted = Vec::with_capacity(2);

        // Dropping `txn` on an early return rolls both inserts back.
        let txn = db.begin().await?;

        let active_course = active_course::Model::current_for_date(&txn, &date)
            .await?
            .map(|(_, course)| course.course_name);

        match AttendanceRecord::insert_if_absent(&txn, new_record(&scan, &date, &time, GENERAL_COURSE)).await? {
            Some(row) => {
                messages.push(GENERAL_RECORDED.to_owned());
                inserted.push(row);
            }
            None => messages.push(GENERAL_ALREADY_RECORDED.to_owned()),
        }

        if let Some(course) = &active_course {
            match AttendanceRecord::insert_if_absent(&txn, new_record(&scan, &date, &time, course)).await? {
                Some(row) => {
                    messages.push(course_recorded(course));
                    inserted.push(row);
                }
                None => messages.push(course_already_recorded(course)),
            }
        }

        txn.commit().await?;

        info!(
            student_id = %scan.student_id,
            date = %date,
            course = active_course.as_deref().unwrap_or(GENERAL_COURSE),
            inserted = inserted.len(),
            "attendance scan processed"
        );

        for row in &inserted {
            events::publish(notifier, AttendanceEvent::NewAttendance(row.clone())).await;
        }

        if let Some(course) = active_course {
            match AttendanceRecord::count_distinct_students(db, &date, &course).await {
                Ok(count) => {
                    let event = AttendanceEvent::AttendanceCount(AttendanceCount { course, count, date });
                    events::publish(notifier, event).await;
                }
                Err(err) => warn!(error = %err, "could not count attendance for notification"),
            }
        }

        Ok(MarkOutcome {
            success: true,
            messages,
            inserted,
        })
    }
}

fn new_record<'a>(scan: &'a ScanPayload, date: &'a str, time: &'a str, course: &'a str) -> NewRecord<'a> {
    NewRecord {
        student_id: &scan.student_id,
        name: &scan.name,
        date,
        time,
        course,
    }
}
