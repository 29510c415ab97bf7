//! Derived fields of a work session, computed at write time from the submitted values.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClockError {
    #[error("{field} must be a HH:MM time, got '{value}'")]
    Malformed { field: &'static str, value: String },
}

/// Minutes since midnight for an `HH:MM` (or `HH:MM:SS`) wall-clock string. Seconds are ignored.
pub fn minutes_of_day(field: &'static str, value: &str) -> Result<i64, ClockError> {
    let malformed = || ClockError::Malformed {
        field,
        value: value.to_string(),
    };

    let mut parts = value.trim().split(':');
    let hours: i64 = parts.next().and_then(|h| h.parse().ok()).ok_or_else(malformed)?;
    let minutes: i64 = parts.next().and_then(|m| m.parse().ok()).ok_or_else(malformed)?;
    if let Some(seconds) = parts.next() {
        seconds.parse::<u8>().map_err(|_| malformed())?;
    }
    if parts.next().is_some() || !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(malformed());
    }
    Ok(hours * 60 + minutes)
}

/// Elapsed hours between two clock times. Not clamped: an end before the start
/// (an overnight session) yields a negative value.
pub fn total_hours(start_time: Option<&str>, end_time: Option<&str>) -> Result<Option<f64>, ClockError> {
    match (start_time, end_time) {
        (Some(start), Some(end)) => {
            let start = minutes_of_day("start_time", start)?;
            let end = minutes_of_day("end_time", end)?;
            Ok(Some((end - start) as f64 / 60.0))
        }
        _ => Ok(None),
    }
}

/// Distance driven; a reading that went backwards counts as zero.
pub fn total_km(odometer_start: Option<f64>, odometer_end: Option<f64>) -> Option<f64> {
    match (odometer_start, odometer_end) {
        (Some(start), Some(end)) => Some((end - start).max(0.0)),
        _ => None,
    }
}
