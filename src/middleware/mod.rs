pub mod auth;
pub mod response;

pub use auth::{require_manager, ManagerSession};
pub use response::{ApiResponse, ApiResult};
