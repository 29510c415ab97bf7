use sqlx::PgPool;

use super::upload_store::UploadStore;
use super::ServiceError;
use crate::api::{DriverPayload, PhotoUpload};
use crate::database::models::{Driver, DriverFields};
use crate::database::DriverRepository;

/// Write path of the driver registry, including the profile photo files
pub struct DriverService {
    repo: DriverRepository,
    uploads: UploadStore,
}

impl DriverService {
    pub fn new(pool: PgPool, uploads: UploadStore) -> Self {
        Self {
            repo: DriverRepository::new(pool),
            uploads,
        }
    }

    pub async fn create(
        &self,
        payload: DriverPayload,
        photo: Option<PhotoUpload>,
    ) -> Result<Driver, ServiceError> {
        let fields = validate(payload)?;
        let photo_path = self.store_photo(photo).await?;

        match self.repo.insert(&fields, photo_path.as_deref()).await {
            Ok(driver) => {
                tracing::info!("Created driver {} ({})", driver.id, driver.name);
                Ok(driver)
            }
            Err(e) => {
                self.discard(photo_path).await;
                Err(e.into())
            }
        }
    }

    /// Replace all scalar fields. The stored photo is kept unless a new file is attached.
    pub async fn update(
        &self,
        id: i64,
        payload: DriverPayload,
        photo: Option<PhotoUpload>,
    ) -> Result<Driver, ServiceError> {
        let fields = validate(payload)?;
        let existing = self.repo.select_404(id).await?;

        let new_photo = self.store_photo(photo).await?;
        let photo_path = new_photo.as_deref().or(existing.profile_photo.as_deref());

        match self.repo.update(id, &fields, photo_path).await {
            Ok(driver) => {
                if new_photo.is_some() {
                    self.discard(existing.profile_photo).await;
                }
                tracing::info!("Updated driver {}", id);
                Ok(driver)
            }
            Err(e) => {
                self.discard(new_photo).await;
                Err(e.into())
            }
        }
    }

    /// Delete a driver (their work sessions go with it) and their photo file
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let driver = self.repo.delete(id).await?;
        self.discard(driver.profile_photo).await;
        tracing::info!("Deleted driver {}", id);
        Ok(())
    }

    async fn store_photo(&self, photo: Option<PhotoUpload>) -> Result<Option<String>, ServiceError> {
        match photo {
            Some(photo) => Ok(Some(self.uploads.save(&photo.file_name, &photo.bytes).await?)),
            None => Ok(None),
        }
    }

    async fn discard(&self, path: Option<String>) {
        if let Some(path) = path {
            self.uploads.remove(&path).await;
        }
    }
}

pub fn validate(payload: DriverPayload) -> Result<DriverFields, ServiceError> {
    let name = payload.name.ok_or(ServiceError::Validation("Name required"))?;

    Ok(DriverFields {
        name,
        phone: payload.phone,
        address: payload.address,
        license_no: payload.license_no,
        license_expiry: payload.license_expiry,
        aadhaar: payload.aadhaar,
        status: payload.status,
        assigned_vehicle: payload.assigned_vehicle,
    })
}
