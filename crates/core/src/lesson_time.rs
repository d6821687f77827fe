//! Chronology for lesson events.
//!
//! Events store their schedule the way the calendar client sends it: the
//! date as a zero-padded `YYYY-MM-DD` string (safe to compare
//! lexicographically) and the time in 12-hour `H:MM AM/PM` form. Anything
//! that needs real chronology, like sorting within a day or deciding
//! whether a lesson is over, goes through the parsers in this module.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use thiserror::Error;

/// Lessons have a fixed one-hour duration; there is no end time on the
/// event record.
pub const LESSON_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LessonTimeError {
    #[error("invalid lesson date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid lesson time '{0}', expected H:MM AM/PM")]
    InvalidTime(String),
}

pub fn parse_date(date: &str) -> Result<NaiveDate, LessonTimeError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| LessonTimeError::InvalidDate(date.to_string()))
}

/// Parses `3:00 PM` / `03:00 pm` style strings.
pub fn parse_time_12h(time: &str) -> Result<NaiveTime, LessonTimeError> {
    let normalized = time.trim().to_uppercase();
    NaiveTime::parse_from_str(&normalized, "%I:%M %p")
        .map_err(|_| LessonTimeError::InvalidTime(time.to_string()))
}

/// Minutes since midnight, for ordering events within a day.
pub fn minutes_since_midnight(time: &str) -> Result<u32, LessonTimeError> {
    use chrono::Timelike;
    let t = parse_time_12h(time)?;
    Ok(t.hour() * 60 + t.minute())
}

pub fn lesson_start(date: &str, time: &str) -> Result<NaiveDateTime, LessonTimeError> {
    Ok(parse_date(date)?.and_time(parse_time_12h(time)?))
}

pub fn lesson_end(date: &str, time: &str) -> Result<NaiveDateTime, LessonTimeError> {
    Ok(lesson_start(date, time)? + Duration::minutes(LESSON_DURATION_MINUTES))
}

/// Whether the lesson's one-hour slot has fully elapsed at `now`.
pub fn is_past_end(date: &str, time: &str, now: NaiveDateTime) -> Result<bool, LessonTimeError> {
    Ok(now > lesson_end(date, time)?)
}

pub fn weekday_of(date: &str) -> Result<Weekday, LessonTimeError> {
    Ok(parse_date(date)?.weekday())
}

/// Sort key for the calendar listing: lexicographic date first, parsed
/// time-of-day second. Unparseable times sort to the start of the day
/// rather than poisoning the whole listing.
pub fn sort_key(date: &str, time: &str) -> (String, u32) {
    (
        date.to_string(),
        minutes_since_midnight(time).unwrap_or(0),
    )
}
