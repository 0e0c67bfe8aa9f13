use thiserror::Error;

use crate::domain::CarId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Car not found with id: {0}")]
    NotFound(CarId),

    #[error("Car already exists: {brand} {model} ({year})")]
    Duplicate {
        brand: String,
        model: String,
        year: i32,
    },

    #[error("{0}")]
    InvalidRequest(String),
}

impl DomainError {
    /// Stable label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "not_found",
            DomainError::Duplicate { .. } => "duplicate",
            DomainError::InvalidRequest(_) => "invalid_request",
        }
    }
}
