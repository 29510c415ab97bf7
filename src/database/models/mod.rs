pub mod driver;
pub mod work;

pub use driver::{Driver, DriverFields};
pub use work::{WorkFields, WorkSession, WorkSessionWithDriver};
