pub mod credential;

pub use credential::{CredentialRepository, InMemoryCredentialRepository};
