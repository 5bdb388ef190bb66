use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FintrackError {
    #[error("Group has no members")]
    EmptyGroup,

    #[error("Expense payer '{payer}' is not a member of the group")]
    InvalidExpenseOwner { payer: String },

    #[error("Invalid amount in {context}: {reason}")]
    InvalidAmount { context: String, reason: String },

    #[error("Invalid horizon: end date {end} is not after start date {start}")]
    InvalidHorizon { start: NaiveDate, end: NaiveDate },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FintrackError {
    fn from(e: serde_json::Error) -> Self {
        FintrackError::SerializationError(e.to_string())
    }
}
