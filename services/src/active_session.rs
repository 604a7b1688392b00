//! Which course, if any, students are scanning into today.

use chrono::{DateTime, FixedOffset, Utc};
use db::models::{active_course, course, normalize_key};
use db::models::attendance_record::GENERAL_COURSE;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;
use util::clock;

use crate::error::AppError;
use crate::events::{self, AttendanceEvent, AttendanceNotifier, CourseChanged};

/// Scan mode for a day. `General` records daily presence only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    #[default]
    General,
    Course,
}

impl Mode {
    /// Parses an optional client-supplied mode. Missing or blank means general.
    pub fn parse_opt(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(Mode::General),
            Some(s) => s.parse().map_err(|_| {
                AppError::validation(format!("Invalid mode '{s}' (expected 'general' or 'course')"))
            }),
        }
    }
}

/// Today's state as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSession {
    pub active: bool,
    /// Empty when no course is active.
    pub course: String,
    pub mode: Mode,
    pub course_id: Option<i64>,
}

impl ActiveSession {
    fn inactive() -> Self {
        Self {
            active: false,
            course: String::new(),
            mode: Mode::General,
            course_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionChange {
    pub message: String,
    pub course: String,
    pub mode: Mode,
}

pub const SESSION_UPDATED: &str = "Course and mode updated";
pub const SESSION_CLEARED: &str = "Session cleared (no active course)";

pub struct ActiveSessionService;

impl ActiveSessionService {
    /// Switches today's mode. Course mode creates the course on first use and
    /// makes it the authoritative active course; general mode clears the day.
    pub async fn set_course<N: AttendanceNotifier>(
        db: &DatabaseConnection,
        notifier: &N,
        course_name: &str,
        mode: Mode,
        now: DateTime<FixedOffset>,
    ) -> Result<SessionChange, AppError> {
        let course_name = course_name.trim();
        let today = clock::date_string(&now);

        // Course mode reports the registered spelling of the course.
        let course_name = match mode {
            Mode::Course => {
                if course_name.is_empty() {
                    return Err(AppError::validation("Course required for course mode"));
                }
                if normalize_key(course_name) == normalize_key(GENERAL_COURSE) {
                    return Err(AppError::validation(format!(
                        "'{GENERAL_COURSE}' is reserved for daily attendance"
                    )));
                }

                let txn = db.begin().await?;
                let course = course::Model::resolve_or_create(&txn, course_name).await?;
                active_course::Model::activate(&txn, course.id, &today).await?;
                txn.commit().await?;
                course.course_name
            }
            Mode::General => {
                active_course::Model::clear_for_date(db, &today).await?;
                course_name.to_owned()
            }
        };

        info!(course = %course_name, %mode, date = %today, "active course set");

        let announced = if mode == Mode::Course { course_name.as_str() } else { "" };
        announce(notifier, announced, mode).await;

        Ok(SessionChange {
            message: SESSION_UPDATED.to_owned(),
            course: course_name,
            mode,
        })
    }

    /// The authoritative active course for `date`, if any.
    pub async fn get_active<C: ConnectionTrait>(
        db: &C,
        date: &str,
    ) -> Result<ActiveSession, AppError> {
        Ok(match active_course::Model::current_for_date(db, date).await? {
            Some((active, course)) => ActiveSession {
                active: true,
                course: course.course_name,
                mode: Mode::Course,
                course_id: Some(active.course_id),
            },
            None => ActiveSession::inactive(),
        })
    }

    /// Returns to general mode for today.
    pub async fn clear<N: AttendanceNotifier>(
        db: &DatabaseConnection,
        notifier: &N,
        now: DateTime<FixedOffset>,
    ) -> Result<&'static str, AppError> {
        let today = clock::date_string(&now);
        let removed = active_course::Model::clear_for_date(db, &today).await?;
        info!(date = %today, removed, "active course cleared");

        announce(notifier, "", Mode::General).await;
        Ok(SESSION_CLEARED)
    }
}

async fn announce<N: AttendanceNotifier>(notifier: &N, course: &str, mode: Mode) {
    let event = AttendanceEvent::CourseChanged(CourseChanged {
        course: course.to_owned(),
        mode: mode.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    });
    events::publish(notifier, event).await;
}
