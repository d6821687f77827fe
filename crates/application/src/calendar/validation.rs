use tutorhub_core::lesson_time;
use validator::ValidationError;

/// Custom validator for lesson dates (YYYY-MM-DD).
pub fn validate_date_format(date: &str) -> Result<(), ValidationError> {
    lesson_time::parse_date(date)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_date"))
}

/// Custom validator for 12-hour lesson times such as "3:00 PM".
pub fn validate_time_format(time: &str) -> Result<(), ValidationError> {
    lesson_time::parse_time_12h(time)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_time"))
}
