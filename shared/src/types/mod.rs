//! Type definitions shared by the API layer
//!
//! - `response` - JSON response envelope and health checks

pub mod response;

pub use response::{ApiResponse, HealthResponse};
