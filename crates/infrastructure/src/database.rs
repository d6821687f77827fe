pub use sea_orm::DatabaseConnection;

use migration::{Migrator, MigratorTrait};

/// Connects to the database and brings the schema up to date. The app has
/// always auto-synced its schema on boot; pending migrations run here so
/// a fresh SQLite file works out of the box.
pub async fn init_database(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let db = sea_orm::Database::connect(database_url).await?;
    tracing::info!("Database connected successfully");

    Migrator::up(&db, None).await?;
    tracing::info!("Database schema is up to date");

    Ok(db)
}
