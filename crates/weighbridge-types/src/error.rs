//! Error types for weighbridge

use thiserror::Error;

/// Required fields checked when a transaction is saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    VehicleRegistration,
    Customer,
    FirstMass,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::VehicleRegistration => "vehicle registration",
            RequiredField::Customer => "customer",
            RequiredField::FirstMass => "first mass",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Capture and save precondition failures
///
/// Always recoverable: the capture flow is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required field(s): {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),

    #[error("Please capture first mass before second mass")]
    FirstMassMissing,

    #[error("Second mass has already been captured")]
    SecondMassAlreadyCaptured,

    #[error("Unknown customer: {0}")]
    UnknownCustomer(String),

    #[error("Invalid mass: {0}")]
    InvalidMass(String),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Transaction store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Store data corrupted: {0}")]
    Corrupted(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("{0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_names_each_field() {
        let err = ValidationError::MissingFields(vec![
            RequiredField::VehicleRegistration,
            RequiredField::FirstMass,
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required field(s): vehicle registration, first mass"
        );
    }

    #[test]
    fn test_validation_wraps_into_error() {
        let err: Error = ValidationError::FirstMassMissing.into();
        assert!(matches!(err, Error::Validation(ValidationError::FirstMassMissing)));
    }
}
