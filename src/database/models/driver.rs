use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_STATUS: &str = "active";

/// A row from the `drivers` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub license_no: Option<String>,
    pub license_expiry: Option<String>,
    pub aadhaar: Option<String>,
    pub profile_photo: Option<String>,
    pub status: String,
    pub assigned_vehicle: Option<String>,
}

/// Scalar driver columns as written on create and update. The photo path is handled separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverFields {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub license_no: Option<String>,
    pub license_expiry: Option<String>,
    pub aadhaar: Option<String>,
    /// Defaults to `active` if omitted.
    pub status: Option<String>,
    pub assigned_vehicle: Option<String>,
}

impl DriverFields {
    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }
}
