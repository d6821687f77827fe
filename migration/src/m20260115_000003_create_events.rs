use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(
                        ColumnDef::new(Events::Date)
                            .string()
                            .not_null()
                            .comment("YYYY-MM-DD"),
                    )
                    .col(
                        ColumnDef::new(Events::Time)
                            .string()
                            .not_null()
                            .comment("12-hour clock, e.g. 3:00 PM"),
                    )
                    .col(ColumnDef::new(Events::Color).string())
                    .col(ColumnDef::new(Events::TutorId).integer().not_null())
                    .col(ColumnDef::new(Events::StudentId).integer().not_null())
                    .col(ColumnDef::new(Events::Subject).string())
                    .col(
                        ColumnDef::new(Events::PaymentPending)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // Deliberately not unique; see the billing backfill notes.
                    .col(ColumnDef::new(Events::TransactionId).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_tutor_date")
                    .table(Events::Table)
                    .col(Events::TutorId)
                    .col(Events::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_student_date")
                    .table(Events::Table)
                    .col(Events::StudentId)
                    .col(Events::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Title,
    Date,
    Time,
    Color,
    TutorId,
    StudentId,
    Subject,
    PaymentPending,
    TransactionId,
}
