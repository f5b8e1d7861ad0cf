//! In-memory implementation of CredentialRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::CredentialRepository;

/// Credential repository kept in process memory
///
/// The surrounding application has no account database, so password
/// hashes live here for the lifetime of the process.
#[derive(Clone, Default)]
pub struct InMemoryCredentialRepository {
    hashes: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCredentialRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts with a stored password
    pub async fn len(&self) -> usize {
        self.hashes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.hashes.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn set_password_hash(&self, email: &str, password_hash: &str) -> Result<(), DomainError> {
        if email.is_empty() {
            return Err(DomainError::Validation {
                message: "Email is required".to_string(),
            });
        }
        self.hashes
            .write()
            .await
            .insert(email.to_string(), password_hash.to_string());
        Ok(())
    }

    async fn find_password_hash(&self, email: &str) -> Result<Option<String>, DomainError> {
        Ok(self.hashes.read().await.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_find_password_hash() {
        let repo = InMemoryCredentialRepository::new();
        assert!(repo.find_password_hash("user@test.com").await.unwrap().is_none());

        repo.set_password_hash("user@test.com", "$2b$04$first").await.unwrap();
        repo.set_password_hash("user@test.com", "$2b$04$second").await.unwrap();

        assert_eq!(
            repo.find_password_hash("user@test.com").await.unwrap(),
            Some("$2b$04$second".to_string())
        );
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_rejects_empty_email() {
        let repo = InMemoryCredentialRepository::new();
        let result = repo.set_password_hash("", "$2b$04$hash").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(repo.is_empty().await);
    }
}
