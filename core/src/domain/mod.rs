//! Domain layer containing the entities of the password-reset flow

pub mod entities;

pub use entities::*;
