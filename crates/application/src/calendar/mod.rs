pub mod dtos;
pub mod use_cases;
mod validation;

pub use validation::{validate_date_format, validate_time_format};
