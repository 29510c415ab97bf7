pub mod driver_service;
pub mod session_metrics;
pub mod upload_store;
pub mod work_service;

use thiserror::Error;

use crate::database::DatabaseError;
use crate::error::ApiError;
use session_metrics::ClockError;
use upload_store::UploadError;

pub use driver_service::DriverService;
pub use upload_store::UploadStore;
pub use work_service::WorkService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("This entry already exists. Invalid.")]
    Duplicate,

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => ApiError::validation_error(msg),
            ServiceError::Duplicate => ApiError::duplicate_entry(ServiceError::Duplicate.to_string()),
            ServiceError::Clock(e) => e.into(),
            ServiceError::Database(e) => e.into(),
            ServiceError::Upload(e) => e.into(),
        }
    }
}
