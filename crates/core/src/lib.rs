pub mod entities;
pub mod lesson_time;
