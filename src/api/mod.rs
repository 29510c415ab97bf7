pub mod lenient;
pub mod payload;

pub use payload::{DriverPayload, LoginRequest, PhotoUpload, WorkListQuery, WorkPayload};
