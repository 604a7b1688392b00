use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510190004_create_attendance"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("attendance"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("student_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("date")).string().not_null()) // YYYY-MM-DD
                    .col(ColumnDef::new(Alias::new("time")).string().not_null()) // HH:MM:SS
                    .col(ColumnDef::new(Alias::new("course")).string().not_null())
                    .col(ColumnDef::new(Alias::new("student_key")).string().not_null())
                    .col(ColumnDef::new(Alias::new("course_key")).string().not_null())
                    .to_owned(),
            )
            .await?;

        // One row per (date, student, course) after normalisation. Inserts
        // target this index with ON CONFLICT DO NOTHING.
        manager
            .create_index(
                Index::create()
                    .name("uq_attendance_date_student_course")
                    .table(Alias::new("attendance"))
                    .col(Alias::new("date"))
                    .col(Alias::new("student_key"))
                    .col(Alias::new("course_key"))
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_date_course")
                    .table(Alias::new("attendance"))
                    .col(Alias::new("date"))
                    .col(Alias::new("course_key"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("attendance")).to_owned())
            .await
    }
}
