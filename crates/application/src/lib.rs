pub mod auth;
pub mod calendar;
pub mod connections;
pub mod context;
pub mod error;
pub mod files;
pub mod finance;
pub mod messages;
pub mod progress;
pub mod tasks;
pub mod users;

pub use context::Caller;
pub use error::{AppError, AppResult};
