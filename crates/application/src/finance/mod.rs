pub mod dtos;
pub mod reconcile;
pub mod use_cases;
