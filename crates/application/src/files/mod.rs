pub mod dtos;
mod storage;
pub mod use_cases;
