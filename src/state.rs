use std::sync::Arc;

use crate::auth::{AuthError, CredentialGate};
use crate::config::AppConfig;
use crate::database::{Database, DriverRepository, WorkRepository};
use crate::services::{DriverService, UploadStore, WorkService};

/// Shared state for axum request handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub gate: Arc<CredentialGate>,
    pub uploads: UploadStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Result<Self, AuthError> {
        Ok(Self {
            db,
            gate: Arc::new(CredentialGate::new(&config.security)?),
            uploads: UploadStore::new(config.api.upload_dir.clone()),
            config: Arc::new(config),
        })
    }

    pub fn driver_repository(&self) -> DriverRepository {
        DriverRepository::new(self.db.pool().clone())
    }

    pub fn work_repository(&self) -> WorkRepository {
        WorkRepository::new(self.db.pool().clone())
    }

    pub fn driver_service(&self) -> DriverService {
        DriverService::new(self.db.pool().clone(), self.uploads.clone())
    }

    pub fn work_service(&self) -> WorkService {
        WorkService::new(self.db.pool().clone())
    }
}
