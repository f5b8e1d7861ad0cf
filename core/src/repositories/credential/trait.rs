//! Credential repository trait

use async_trait::async_trait;

use crate::errors::DomainError;

/// Storage for account password hashes
///
/// Keys are normalized identifiers (lowercased emails). Implementations
/// only ever see hashes, never plaintext passwords.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Store the password hash for an account, replacing any previous one
    ///
    /// # Arguments
    ///
    /// * `email` - Normalized account identifier
    /// * `password_hash` - bcrypt hash of the new password
    async fn set_password_hash(&self, email: &str, password_hash: &str) -> Result<(), DomainError>;

    /// Fetch the current password hash for an account
    ///
    /// # Returns
    ///
    /// * `Ok(Some(hash))` - If the account has a password
    /// * `Ok(None)` - If no password was ever stored
    async fn find_password_hash(&self, email: &str) -> Result<Option<String>, DomainError>;
}
