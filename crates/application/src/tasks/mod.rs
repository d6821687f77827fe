pub mod dtos;
pub mod use_cases;
