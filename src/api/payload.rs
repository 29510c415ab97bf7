use axum::body::Bytes;
use chrono::NaiveDate;
use serde::Deserialize;

use super::lenient::{self, opt_f64, opt_i64, opt_text};
use crate::database::WorkFilter;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "opt_text")]
    pub password: Option<String>,
}

/// Driver fields as submitted, by JSON body or multipart form
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DriverPayload {
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub license_no: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub license_expiry: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub aadhaar: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub assigned_vehicle: Option<String>,
}

impl DriverPayload {
    /// Assign a multipart text field by name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        let value = lenient::non_blank(value);
        match name {
            "name" => self.name = value,
            "phone" => self.phone = value,
            "address" => self.address = value,
            "license_no" => self.license_no = value,
            "license_expiry" => self.license_expiry = value,
            "aadhaar" => self.aadhaar = value,
            "status" => self.status = value,
            "assigned_vehicle" => self.assigned_vehicle = value,
            _ => {}
        }
    }
}

/// A file part received with a driver form
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkPayload {
    #[serde(default, deserialize_with = "opt_i64")]
    pub driver_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub machine: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub odometer_start: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub odometer_end: Option<f64>,
    #[serde(default, deserialize_with = "opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub location: Option<String>,
}

/// `GET /api/works` query string. Empty values are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkListQuery {
    pub driver_id: Option<String>,
    pub machine: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl TryFrom<WorkListQuery> for WorkFilter {
    type Error = ApiError;

    fn try_from(query: WorkListQuery) -> Result<Self, Self::Error> {
        let driver_id = match query.driver_id.as_deref() {
            Some(raw) => lenient::parse_i64(raw)
                .map_err(|_| ApiError::bad_request("driverId must be an integer"))?,
            None => None,
        };

        Ok(WorkFilter {
            driver_id,
            machine: query.machine.and_then(lenient::non_blank),
            date_from: query_date("dateFrom", query.date_from)?,
            date_to: query_date("dateTo", query.date_to)?,
        })
    }
}

fn query_date(name: &str, raw: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.and_then(lenient::non_blank) {
        Some(value) => lenient::parse_date(&value)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("{name} must be a YYYY-MM-DD date"))),
        None => Ok(None),
    }
}
