pub mod prelude;

pub mod connections;
pub mod events;
pub mod files;
pub mod messages;
pub mod progress;
pub mod tasks;
pub mod transactions;
pub mod users;
