//! Shared HTTP building blocks: error body and extractors

pub mod error;
pub mod path;
pub mod validated_json;

pub use error::{ApiError, ErrorResponse};
pub use path::ApiPath;
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
