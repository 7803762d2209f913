//! Business logic behind the HTTP routes.
//!
//! Services are generic over the repository traits so they can run against
//! the in-memory test repository as well as SQLite.

pub mod errors;
pub mod items;
pub mod points;

pub use errors::{ServiceError, ServiceResult};
