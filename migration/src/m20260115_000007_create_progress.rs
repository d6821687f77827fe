use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Progress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Progress::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Progress::Subject).string().not_null())
                    .col(
                        ColumnDef::new(Progress::ProgressPct)
                            .double()
                            .not_null()
                            .comment("0..=100"),
                    )
                    .col(ColumnDef::new(Progress::Grade).string())
                    .col(
                        ColumnDef::new(Progress::HoursStudied)
                            .double()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Progress::LessonsCompleted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Progress::StudentId).integer().not_null())
                    .col(ColumnDef::new(Progress::TutorId).integer().not_null())
                    .col(
                        ColumnDef::new(Progress::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_progress_student")
                    .table(Progress::Table)
                    .col(Progress::StudentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Progress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Progress {
    Table,
    Id,
    Subject,
    #[sea_orm(iden = "progress")]
    ProgressPct,
    Grade,
    HoursStudied,
    LessonsCompleted,
    StudentId,
    TutorId,
    CreatedAt,
}
