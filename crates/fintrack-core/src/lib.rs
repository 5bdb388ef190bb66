pub mod calendar;
pub mod error;
pub mod types;

#[cfg(feature = "settlement")]
pub mod settlement;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "vault")]
pub mod vault;

pub use error::FintrackError;
pub use types::*;

/// Standard result type for all fintrack operations
pub type FintrackResult<T> = Result<T, FintrackError>;
