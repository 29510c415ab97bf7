use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `works` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkSession {
    pub id: i64,
    pub driver_id: i64,
    pub date: NaiveDate,
    pub machine: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub odometer_start: Option<f64>,
    pub odometer_end: Option<f64>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub total_hours: Option<f64>,
    pub total_km: Option<f64>,
}

/// List row: the session joined with its driver's display name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkSessionWithDriver {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub work: WorkSession,
    pub driver_name: String,
}

/// Every column written on insert and update, derived totals included.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkFields {
    pub driver_id: i64,
    pub date: NaiveDate,
    pub machine: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub odometer_start: Option<f64>,
    pub odometer_end: Option<f64>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub total_hours: Option<f64>,
    pub total_km: Option<f64>,
}
