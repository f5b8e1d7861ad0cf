//! # Flexify Core
//!
//! Core business logic for the Flexify password-reset flow.
//! This crate contains the one-time passcode store and generator, the
//! password-reset service that drives them, the credential repository
//! interface, and the error types shared by the outer layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
