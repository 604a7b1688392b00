use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryFilter, QueryOrder};

use super::course;

/// "Course X is the scan target on `active_date`."
///
/// Several rows may exist for one date; the highest id is authoritative.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "active_courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    /// YYYY-MM-DD in the configured local offset.
    pub active_date: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The authoritative active course for `date`, joined with its course.
    pub async fn current_for_date<C: ConnectionTrait>(
        db: &C,
        date: &str,
    ) -> Result<Option<(Model, course::Model)>, DbErr> {
        let row = Entity::find()
            .filter(Column::ActiveDate.eq(date))
            .order_by_desc(Column::Id)
            .find_also_related(course::Entity)
            .one(db)
            .await?;

        Ok(row.and_then(|(active, course)| course.map(|c| (active, c))))
    }

    /// Makes `course_id` the active course for `date`.
    ///
    /// A no-op when it already is. Otherwise any older row for the same
    /// course is replaced so the new row becomes the most recent one.
    pub async fn activate<C: ConnectionTrait>(
        db: &C,
        course_id: i64,
        date: &str,
    ) -> Result<Model, DbErr> {
        if let Some((current, _)) = Self::current_for_date(db, date).await? {
            if current.course_id == course_id {
                return Ok(current);
            }
        }

        Entity::delete_many()
            .filter(Column::ActiveDate.eq(date))
            .filter(Column::CourseId.eq(course_id))
            .exec(db)
            .await?;

        ActiveModel {
            course_id: Set(course_id),
            active_date: Set(date.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Removes every active row for `date`. Returns how many were removed.
    pub async fn clear_for_date<C: ConnectionTrait>(db: &C, date: &str) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::ActiveDate.eq(date))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
