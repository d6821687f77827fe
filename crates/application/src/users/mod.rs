pub mod dtos;
pub mod use_cases;

pub use dtos::UserSummary;
