use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Files::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Files::Name).string().not_null())
                    .col(
                        ColumnDef::new(Files::Type)
                            .string()
                            .not_null()
                            .comment("document | video | image | ..."),
                    )
                    .col(
                        ColumnDef::new(Files::Size)
                            .string()
                            .not_null()
                            .comment("human readable, e.g. 2.5 MB"),
                    )
                    .col(ColumnDef::new(Files::Url).string())
                    .col(ColumnDef::new(Files::Subject).string())
                    .col(ColumnDef::new(Files::UploadedById).integer().not_null())
                    .col(
                        ColumnDef::new(Files::AssignedToId)
                            .integer()
                            .comment("NULL = shared with all connected students"),
                    )
                    .col(
                        ColumnDef::new(Files::CreatedAt)
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
                    .name("idx_files_uploaded_by")
                    .table(Files::Table)
                    .col(Files::UploadedById)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Files {
    Table,
    Id,
    Name,
    Type,
    Size,
    Url,
    Subject,
    UploadedById,
    AssignedToId,
    CreatedAt,
}
