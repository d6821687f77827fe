pub mod dtos;
pub mod use_cases;

pub use dtos::Claims;
pub use use_cases::AuthConfig;
