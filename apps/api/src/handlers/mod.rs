pub mod auth;
pub mod calendar;
pub mod connections;
pub mod error_handler;
pub mod files;
pub mod finance;
pub mod health;
pub mod messages;
pub mod progress;
pub mod tasks;
pub mod users;
