pub mod manager;
pub mod models;
pub mod repository;
pub mod work_repository;

pub use manager::{Database, DatabaseError};
pub use repository::DriverRepository;
pub use work_repository::{WorkFilter, WorkRepository};
