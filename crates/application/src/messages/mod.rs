pub mod dtos;
mod format;
pub mod use_cases;
