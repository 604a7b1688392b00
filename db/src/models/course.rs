use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryFilter};
use serde::Serialize;

use super::normalize_key;

/// A course that has been activated at least once. Never deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name as first entered by an admin.
    pub course_name: String,
    /// `lower(trim(course_name))`, unique.
    #[serde(skip_serializing)]
    pub course_key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::active_course::Entity")]
    ActiveCourse,
}

impl Related<super::active_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActiveCourse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Looks a course up by its normalized key.
    pub async fn find_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseKey.eq(normalize_key(name)))
            .one(db)
            .await
    }

    /// Finds the course matching `name` ignoring case and surrounding
    /// whitespace, creating it if it does not exist yet.
    pub async fn resolve_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, DbErr> {
        let name = name.trim();
        let key = normalize_key(name);
        if key.is_empty() {
            return Err(DbErr::Custom("course name cannot be empty".into()));
        }

        Entity::insert(ActiveModel {
            course_name: Set(name.to_owned()),
            course_key: Set(key),
            ..Default::default()
        })
        .on_conflict(OnConflict::column(Column::CourseKey).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;

        Self::find_by_name(db, name)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("course '{name}'")))
    }
}
