pub mod custom_fields;
pub mod error;
pub mod ticket_detail;
pub mod ticket_update;

pub use error::ServiceError;
