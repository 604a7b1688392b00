//! Attendance percentages and eligibility.
//!
//! A course's class count is the number of distinct dates on which anyone
//! was recorded for it. A student's percentage for a course is their distinct
//! attended dates over that count. Courses and students are grouped by their
//! normalized keys and displayed under the first spelling seen.

use std::collections::{BTreeMap, BTreeSet};

use db::models::attendance_record::{Model as AttendanceRecord, RecordFilter};
use db::models::normalize_key;
use sea_orm::sea_query::Order;
use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::error::AppError;

pub const NO_RECORDS_FOR_STUDENT: &str = "No attendance record found for this matric number.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentCoursePerformance {
    pub student_id: String,
    pub name: String,
    pub course: String,
    pub attended: usize,
    pub total_classes: usize,
    pub attendance_percent: f64,
    pub eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseAverage {
    pub course: String,
    pub total_classes: usize,
    pub avg_attendance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseStanding {
    pub course: String,
    pub total_classes: usize,
    pub attended: usize,
    pub attendance_percent: f64,
    pub eligible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReport {
    pub matric: String,
    pub name: String,
    pub overall_percent: f64,
    pub eligible: bool,
    pub courses: Vec<CourseStanding>,
}

struct Student<'a> {
    id: &'a str,
    name: &'a str,
    dates: BTreeSet<&'a str>,
}

struct Course<'a> {
    name: &'a str,
    dates: BTreeSet<&'a str>,
    students: BTreeMap<String, Student<'a>>,
}

fn index(records: &[AttendanceRecord]) -> BTreeMap<String, Course<'_>> {
    let mut courses: BTreeMap<String, Course<'_>> = BTreeMap::new();
    for r in records {
        let course = courses
            .entry(normalize_key(&r.course))
            .or_insert_with(|| Course {
                name: &r.course,
                dates: BTreeSet::new(),
                students: BTreeMap::new(),
            });
        course.dates.insert(&r.date);
        course
            .students
            .entry(normalize_key(&r.student_id))
            .or_insert_with(|| Student {
                id: &r.student_id,
                name: &r.name,
                dates: BTreeSet::new(),
            })
            .dates
            .insert(&r.date);
    }
    courses
}

fn percent(attended: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        attended as f64 / total as f64 * 100.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One row per (student, course) pair that has any attendance.
pub fn performance(records: &[AttendanceRecord], threshold: f64) -> Vec<StudentCoursePerformance> {
    let courses = index(records);

    let mut rows: Vec<(String, String, StudentCoursePerformance)> = Vec::new();
    for (course_key, course) in &courses {
        let total = course.dates.len();
        for (student_key, student) in &course.students {
            let p = percent(student.dates.len(), total);
            rows.push((
                student_key.clone(),
                course_key.clone(),
                StudentCoursePerformance {
                    student_id: student.id.to_owned(),
                    name: student.name.to_owned(),
                    course: course.name.to_owned(),
                    attended: student.dates.len(),
                    total_classes: total,
                    attendance_percent: round2(p),
                    eligible: p >= threshold,
                },
            ));
        }
    }

    rows.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    rows.into_iter().map(|(_, _, row)| row).collect()
}

/// Mean of the per-student percentages of each course.
pub fn course_averages(records: &[AttendanceRecord]) -> Vec<CourseAverage> {
    index(records)
        .into_values()
        .map(|course| {
            let total = course.dates.len();
            let sum: f64 = course
                .students
                .values()
                .map(|s| percent(s.dates.len(), total))
                .sum();
            let avg = if course.students.is_empty() {
                0.0
            } else {
                sum / course.students.len() as f64
            };
            CourseAverage {
                course: course.name.to_owned(),
                total_classes: total,
                avg_attendance: round2(avg),
            }
        })
        .collect()
}

/// Standing of one student in every course on record, including courses
/// they never attended. `None` when the student has no records at all.
pub fn student_report(
    records: &[AttendanceRecord],
    matric: &str,
    threshold: f64,
) -> Option<StudentReport> {
    let key = normalize_key(matric);
    let name = records
        .iter()
        .find(|r| normalize_key(&r.student_id) == key)
        .map(|r| r.name.clone())?;

    let mut percents = Vec::new();
    let courses: Vec<CourseStanding> = index(records)
        .into_values()
        .map(|course| {
            let total = course.dates.len();
            let attended = course.students.get(&key).map_or(0, |s| s.dates.len());
            let p = percent(attended, total);
            percents.push(p);
            CourseStanding {
                course: course.name.to_owned(),
                total_classes: total,
                attended,
                attendance_percent: round2(p),
                eligible: p >= threshold,
            }
        })
        .collect();

    // Averaged from unrounded per-course values.
    let overall = if percents.is_empty() {
        0.0
    } else {
        percents.iter().sum::<f64>() / percents.len() as f64
    };

    Some(StudentReport {
        matric: matric.trim().to_uppercase(),
        name,
        overall_percent: round2(overall),
        eligible: overall >= threshold,
        courses,
    })
}

pub struct ReportService;

impl ReportService {
    async fn all_records<C: ConnectionTrait>(db: &C) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(AttendanceRecord::query(db, &RecordFilter::default(), Order::Asc).await?)
    }

    pub async fn performance<C: ConnectionTrait>(
        db: &C,
        threshold: f64,
    ) -> Result<Vec<StudentCoursePerformance>, AppError> {
        Ok(performance(&Self::all_records(db).await?, threshold))
    }

    pub async fn course_averages<C: ConnectionTrait>(db: &C) -> Result<Vec<CourseAverage>, AppError> {
        Ok(course_averages(&Self::all_records(db).await?))
    }

    pub async fn student<C: ConnectionTrait>(
        db: &C,
        matric: &str,
        threshold: f64,
    ) -> Result<StudentReport, AppError> {
        student_report(&Self::all_records(db).await?, matric, threshold)
            .ok_or_else(|| AppError::not_found(NO_RECORDS_FOR_STUDENT))
    }
}
