pub mod active_course;
pub mod attendance_record;
pub mod course;
pub mod user;

pub use active_course::Entity as ActiveCourse;
pub use attendance_record::Entity as AttendanceRecord;
pub use course::Entity as Course;
pub use user::Entity as User;

/// Key used for case- and whitespace-insensitive comparisons of student ids
/// and course names.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}
