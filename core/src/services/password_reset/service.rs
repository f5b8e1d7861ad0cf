//! Main password reset service implementation

use std::sync::Arc;
use tracing;

use flexify_shared::{is_valid_email, mask_email, normalize_identifier};

use crate::domain::entities::otp_record::CODE_LENGTH;
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::credential::CredentialRepository;
use crate::services::otp::{OtpStore, VerifyOutcome};

use super::config::{PasswordResetConfig, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use super::traits::NotificationSender;
use super::types::RequestOtpResult;

/// Password reset service driving the OTP lifecycle
pub struct PasswordResetService<N: NotificationSender, R: CredentialRepository> {
    /// Outstanding codes, one per identifier
    store: OtpStore,
    /// Delivers issued codes
    notifier: Arc<N>,
    /// Stores the new password hashes
    credentials: Arc<R>,
    /// Service configuration
    config: PasswordResetConfig,
}

impl<N: NotificationSender, R: CredentialRepository> PasswordResetService<N, R> {
    /// Create a new password reset service with its own OTP store
    ///
    /// # Arguments
    ///
    /// * `notifier` - Notification sender implementation
    /// * `credentials` - Credential repository implementation
    /// * `config` - Service configuration
    pub fn new(notifier: Arc<N>, credentials: Arc<R>, config: PasswordResetConfig) -> Self {
        let store = OtpStore::new(config.code_expiration());
        Self::with_store(store, notifier, credentials, config)
    }

    /// Create a service around an existing store
    pub fn with_store(
        store: OtpStore,
        notifier: Arc<N>,
        credentials: Arc<R>,
        config: PasswordResetConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            credentials,
            config,
        }
    }

    /// The underlying OTP store
    pub fn store(&self) -> &OtpStore {
        &self.store
    }

    /// Issue a code for an email address and deliver it
    ///
    /// Requesting again while a code is outstanding replaces it: the old
    /// code stops verifying and a fresh expiry window starts.
    ///
    /// # Arguments
    ///
    /// * `email` - The account email address
    ///
    /// # Returns
    ///
    /// * `Ok(RequestOtpResult)` - Expiry details and the delivery ID
    /// * `Err(DomainError)` - If the email is missing or malformed, or delivery fails
    pub async fn request_otp(&self, email: &str) -> DomainResult<RequestOtpResult> {
        if email.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Email is required".to_string(),
            });
        }
        if !is_valid_email(email) {
            return Err(DomainError::Validation {
                message: "Invalid email format".to_string(),
            });
        }

        let issued = self.store.issue(email);
        let masked = mask_email(&issued.identifier);

        let delivery_id = match self
            .notifier
            .send_code(&issued.identifier, &issued.code)
            .await
        {
            Ok(id) => id,
            Err(reason) => {
                tracing::error!(
                    identifier = %masked,
                    error = %reason,
                    cleared = self.config.clear_on_delivery_failure,
                    event = "otp_delivery_failed",
                    "Failed to deliver OTP"
                );
                if self.config.clear_on_delivery_failure {
                    self.store.clear_if_current(&issued.identifier, issued.generation);
                }
                return Err(OtpError::DeliveryFailed { reason }.into());
            }
        };

        tracing::info!(
            identifier = %masked,
            delivery_id = %delivery_id,
            event = "otp_sent",
            "OTP delivered"
        );

        Ok(RequestOtpResult {
            expires_in_seconds: (issued.expires_at - issued.issued_at).num_seconds(),
            identifier: issued.identifier,
            expires_at: issued.expires_at,
            resend_after_seconds: self.config.resend_cooldown_seconds,
            delivery_id,
        })
    }

    /// Verify a submitted code without consuming it
    ///
    /// The same code keeps verifying until it expires, is replaced, or the
    /// reset is finalized.
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<()> {
        if email.trim().is_empty() || code.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Email and OTP are required".to_string(),
            });
        }

        self.check_code(email, code).map(|_| ())
    }

    /// Finalize a reset: re-verify the code, store the new password, clear the code
    ///
    /// # Arguments
    ///
    /// * `email` - The account email address
    /// * `code` - The code previously verified
    /// * `new_password` - Plain-text new password
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Password stored and code consumed
    /// * `Err(DomainError)` - Missing fields, invalid code, weak password or storage failure
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if email.trim().is_empty() || code.trim().is_empty() || new_password.is_empty() {
            return Err(DomainError::Validation {
                message: "All fields are required".to_string(),
            });
        }

        let generation = self.check_code(email, code)?;
        validate_password(new_password)?;

        let identifier = normalize_identifier(email);
        let password = new_password.to_string();
        let cost = self.config.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })?;

        self.credentials
            .set_password_hash(&identifier, &password_hash)
            .await?;

        let consumed = self.store.clear_if_current(&identifier, generation);

        tracing::info!(
            identifier = %mask_email(&identifier),
            consumed = consumed,
            event = "password_reset",
            "Password reset completed"
        );

        Ok(())
    }

    /// Whether an unexpired code is outstanding for the email
    pub fn has_pending(&self, email: &str) -> bool {
        self.store.has_active(email)
    }

    /// Checks the code as submitted and returns the matched issuance.
    /// Surrounding whitespace makes a code malformed.
    fn check_code(&self, email: &str, code: &str) -> DomainResult<u64> {
        if !is_well_formed_code(code) {
            tracing::warn!(
                identifier = %mask_email(&normalize_identifier(email)),
                event = "otp_malformed",
                "Rejected malformed OTP"
            );
            return Err(OtpError::Mismatch.into());
        }

        match self.store.check(email, code) {
            VerifyOutcome::Valid { generation } => Ok(generation),
            VerifyOutcome::NotFound => Err(OtpError::NotFound.into()),
            VerifyOutcome::Mismatch => Err(OtpError::Mismatch.into()),
        }
    }
}

fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::Validation {
            message: format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
        });
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(DomainError::Validation {
            message: format!("Password must be at most {} bytes", MAX_PASSWORD_LENGTH),
        });
    }
    Ok(())
}
