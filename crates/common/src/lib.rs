//! Common protocol types and errors shared across the payment broker crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
