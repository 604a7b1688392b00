use db::models::attendance_record::{Model as AttendanceRecord, RecordFilter};
use sea_orm::sea_query::Order;
use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::AppError;

pub const HISTORY_DELETED: &str = "All attendance history deleted.";
pub const NO_DATA_FOR_SELECTION: &str = "No data for selection";

const CSV_HEADER: &str = "ID,Name,Date,Time,Course\n";

/// A rendered CSV attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

pub struct AttendanceLedgerService;

impl AttendanceLedgerService {
    /// Newest first.
    pub async fn history<C: ConnectionTrait>(
        db: &C,
        filter: &RecordFilter,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(AttendanceRecord::query(db, filter, Order::Desc).await?)
    }

    /// All records of one student, newest first. A blank id matches nothing.
    pub async fn for_student<C: ConnectionTrait>(
        db: &C,
        student_id: &str,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        if student_id.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(AttendanceRecord::find_for_student(db, student_id).await?)
    }

    /// Oldest first, as CSV. An empty selection is `NotFound`.
    pub async fn export_csv<C: ConnectionTrait>(
        db: &C,
        filter: &RecordFilter,
    ) -> Result<CsvExport, AppError> {
        let rows = AttendanceRecord::query(db, filter, Order::Asc).await?;
        if rows.is_empty() {
            return Err(AppError::not_found(NO_DATA_FOR_SELECTION));
        }

        Ok(CsvExport {
            filename: export_filename(filter),
            body: render_csv(&rows),
        })
    }

    /// Returns whether anything was removed.
    pub async fn delete_record<C: ConnectionTrait>(
        db: &C,
        student_id: &str,
        date: &str,
        time: &str,
    ) -> Result<bool, AppError> {
        let removed = AttendanceRecord::delete_one(db, student_id, date, time).await?;
        info!(student_id, date, time, removed, "attendance record deleted");
        Ok(removed > 0)
    }

    pub async fn delete_history<C: ConnectionTrait>(db: &C) -> Result<&'static str, AppError> {
        let removed = AttendanceRecord::delete_all(db).await?;
        info!(removed, "attendance history deleted");
        Ok(HISTORY_DELETED)
    }
}

/// `attendance_<date|all>_<course|general>.csv`, made safe for a
/// `Content-Disposition` header.
pub fn export_filename(filter: &RecordFilter) -> String {
    let date = filter.date.as_deref().unwrap_or("all");
    let course = filter
        .course
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_else(|| "general".to_owned());
    format!("attendance_{}_{}.csv", safe_segment(date), safe_segment(&course))
}

fn safe_segment(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ' ' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn render_csv(rows: &[AttendanceRecord]) -> String {
    fn esc(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    let mut csv = String::from(CSV_HEADER);
    for r in rows {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            esc(&r.student_id),
            esc(&r.name),
            esc(&r.date),
            esc(&r.time),
            esc(&r.course)
        ));
    }
    csv
}
