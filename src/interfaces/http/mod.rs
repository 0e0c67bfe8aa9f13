//! HTTP REST API
//!
//! - `common`: error body and extractors shared by all handlers
//! - `modules`: handlers grouped by resource
//! - `router`: route table, middleware stack and Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiContext, ApiDoc};
