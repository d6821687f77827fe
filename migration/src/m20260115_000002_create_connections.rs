use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign keys here (or anywhere in this schema): deleting an
        // account leaves its connection rows behind, matching the deployed
        // behavior this service replaces.
        manager
            .create_table(
                Table::create()
                    .table(Connections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Connections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Connections::TutorId).integer().not_null())
                    .col(ColumnDef::new(Connections::StudentId).integer().not_null())
                    .col(
                        ColumnDef::new(Connections::Status)
                            .string()
                            .not_null()
                            .default("pending")
                            .comment("pending | approved | rejected"),
                    )
                    .col(
                        ColumnDef::new(Connections::RequestedById)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Connections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per pair; re-requests after rejection recycle it.
        manager
            .create_index(
                Index::create()
                    .name("idx_connections_pair")
                    .table(Connections::Table)
                    .col(Connections::TutorId)
                    .col(Connections::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_connections_status")
                    .table(Connections::Table)
                    .col(Connections::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Connections::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Connections {
    Table,
    Id,
    TutorId,
    StudentId,
    Status,
    RequestedById,
    CreatedAt,
}
