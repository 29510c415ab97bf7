use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Driver, DriverFields};

const DRIVER_COLUMNS: &str = "id, name, phone, address, license_no, license_expiry, aadhaar, \
                              profile_photo, status, assigned_vehicle";

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All drivers, newest first
    pub async fn select_all(&self) -> Result<Vec<Driver>, DatabaseError> {
        let sql = format!("SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY id DESC");
        let rows = sqlx::query_as::<_, Driver>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn select_one(&self, id: i64) -> Result<Option<Driver>, DatabaseError> {
        let sql = format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = $1");
        let row = sqlx::query_as::<_, Driver>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn select_404(&self, id: i64) -> Result<Driver, DatabaseError> {
        self.select_one(id).await?.ok_or(DatabaseError::NotFound)
    }

    pub async fn insert(
        &self,
        fields: &DriverFields,
        profile_photo: Option<&str>,
    ) -> Result<Driver, DatabaseError> {
        let sql = format!(
            "INSERT INTO drivers (name, phone, address, license_no, license_expiry, aadhaar, \
             profile_photo, status, assigned_vehicle) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {DRIVER_COLUMNS}"
        );
        let driver = sqlx::query_as::<_, Driver>(&sql)
            .bind(&fields.name)
            .bind(&fields.phone)
            .bind(&fields.address)
            .bind(&fields.license_no)
            .bind(&fields.license_expiry)
            .bind(&fields.aadhaar)
            .bind(profile_photo)
            .bind(fields.status_or_default())
            .bind(&fields.assigned_vehicle)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Inserted driver {}", driver.id);
        Ok(driver)
    }

    /// Replace every scalar column and the photo path of an existing driver
    pub async fn update(
        &self,
        id: i64,
        fields: &DriverFields,
        profile_photo: Option<&str>,
    ) -> Result<Driver, DatabaseError> {
        let sql = format!(
            "UPDATE drivers SET name = $1, phone = $2, address = $3, license_no = $4, \
             license_expiry = $5, aadhaar = $6, profile_photo = $7, status = $8, \
             assigned_vehicle = $9 WHERE id = $10 RETURNING {DRIVER_COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&sql)
            .bind(&fields.name)
            .bind(&fields.phone)
            .bind(&fields.address)
            .bind(&fields.license_no)
            .bind(&fields.license_expiry)
            .bind(&fields.aadhaar)
            .bind(profile_photo)
            .bind(fields.status_or_default())
            .bind(&fields.assigned_vehicle)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }

    /// Delete a driver, returning the removed row
    pub async fn delete(&self, id: i64) -> Result<Driver, DatabaseError> {
        let sql = format!("DELETE FROM drivers WHERE id = $1 RETURNING {DRIVER_COLUMNS}");
        sqlx::query_as::<_, Driver>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DatabaseError::NotFound)
    }
}
