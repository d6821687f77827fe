pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
