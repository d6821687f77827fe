pub use sea_orm_migration::prelude::*;

mod m20260115_000001_create_users;
mod m20260115_000002_create_connections;
mod m20260115_000003_create_events;
mod m20260115_000004_create_transactions;
mod m20260115_000005_create_messages;
mod m20260115_000006_create_files;
mod m20260115_000007_create_progress;
mod m20260115_000008_create_tasks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000001_create_users::Migration),
            Box::new(m20260115_000002_create_connections::Migration),
            Box::new(m20260115_000003_create_events::Migration),
            Box::new(m20260115_000004_create_transactions::Migration),
            Box::new(m20260115_000005_create_messages::Migration),
            Box::new(m20260115_000006_create_files::Migration),
            Box::new(m20260115_000007_create_progress::Migration),
            Box::new(m20260115_000008_create_tasks::Migration),
        ]
    }
}
