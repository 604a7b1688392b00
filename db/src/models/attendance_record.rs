use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func, OnConflict, Order};
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;

use super::normalize_key;

/// Reserved course value for the once-a-day presence record.
pub const GENERAL_COURSE: &str = "General";

/// One row of the attendance ledger.
///
/// At most one row exists per `(date, student_key, course_key)`; the
/// database enforces this with a unique index.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i64,
    #[serde(rename = "ID")]
    pub student_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Course")]
    pub course: String,
    #[serde(skip_serializing)]
    pub student_key: String,
    #[serde(skip_serializing)]
    pub course_key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Values for a new ledger row. Keys are derived on insert.
#[derive(Debug, Clone)]
pub struct NewRecord<'a> {
    pub student_id: &'a str,
    pub name: &'a str,
    pub date: &'a str,
    pub time: &'a str,
    pub course: &'a str,
}

/// Optional narrowing for ledger queries. Blank values are ignored.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub date: Option<String>,
    pub course: Option<String>,
}

impl RecordFilter {
    pub fn new(date: Option<String>, course: Option<String>) -> Self {
        let keep = |v: Option<String>| v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
        Self {
            date: keep(date),
            course: keep(course),
        }
    }
}

impl Model {
    pub async fn exists<C: ConnectionTrait>(
        db: &C,
        date: &str,
        student_id: &str,
        course: &str,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::Date.eq(date))
            .filter(Column::StudentKey.eq(normalize_key(student_id)))
            .filter(Column::CourseKey.eq(normalize_key(course)))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    /// Inserts the row unless an equivalent one is already present.
    ///
    /// Returns `Ok(None)` when the unique index rejected the row. Concurrent
    /// callers racing on the same key see exactly one `Some`.
    pub async fn insert_if_absent<C: ConnectionTrait>(
        db: &C,
        record: NewRecord<'_>,
    ) -> Result<Option<Model>, DbErr> {
        let student_key = normalize_key(record.student_id);
        let course_key = normalize_key(record.course);

        let inserted = Entity::insert(ActiveModel {
            student_id: Set(record.student_id.to_owned()),
            name: Set(record.name.to_owned()),
            date: Set(record.date.to_owned()),
            time: Set(record.time.to_owned()),
            course: Set(record.course.to_owned()),
            student_key: Set(student_key.clone()),
            course_key: Set(course_key.clone()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([Column::Date, Column::StudentKey, Column::CourseKey])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

        if inserted == 0 {
            return Ok(None);
        }

        Entity::find()
            .filter(Column::Date.eq(record.date))
            .filter(Column::StudentKey.eq(student_key))
            .filter(Column::CourseKey.eq(course_key))
            .one(db)
            .await
    }

    /// Records matching `filter`, ordered by date then time.
    pub async fn query<C: ConnectionTrait>(
        db: &C,
        filter: &RecordFilter,
        order: Order,
    ) -> Result<Vec<Model>, DbErr> {
        let mut select = Entity::find();
        if let Some(date) = &filter.date {
            select = select.filter(Column::Date.eq(date.as_str()));
        }
        if let Some(course) = &filter.course {
            select = select.filter(Column::CourseKey.eq(normalize_key(course)));
        }

        select
            .order_by(Column::Date, order.clone())
            .order_by(Column::Time, order.clone())
            .order_by(Column::Id, order)
            .all(db)
            .await
    }

    /// Every record of one student, newest first.
    pub async fn find_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: &str,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentKey.eq(normalize_key(student_id)))
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Time)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn delete_all<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
        Ok(Entity::delete_many().exec(db).await?.rows_affected)
    }

    /// Deletes the record(s) of `student_id` stamped at `date` `time`.
    pub async fn delete_one<C: ConnectionTrait>(
        db: &C,
        student_id: &str,
        date: &str,
        time: &str,
    ) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::StudentKey.eq(normalize_key(student_id)))
            .filter(Column::Date.eq(date.trim()))
            .filter(Column::Time.eq(time.trim()))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Distinct students with a record for `(date, course)`.
    pub async fn count_distinct_students<C: ConnectionTrait>(
        db: &C,
        date: &str,
        course: &str,
    ) -> Result<u64, DbErr> {
        let count: Option<i64> = Entity::find()
            .select_only()
            .column_as(
                Expr::expr(Func::count_distinct(Expr::col(Column::StudentKey))),
                "count",
            )
            .filter(Column::Date.eq(date))
            .filter(Column::CourseKey.eq(normalize_key(course)))
            .into_tuple()
            .one(db)
            .await?;

        Ok(count.unwrap_or(0).max(0) as u64)
    }
}
