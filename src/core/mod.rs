//! Core value types: time units and the error taxonomy.

pub mod error;
pub mod time;

pub use error::{ModelError, ResourceError, ValidationError};
pub use time::Seconds;
