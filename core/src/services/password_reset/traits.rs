//! Traits for notification delivery

use async_trait::async_trait;

/// Delivers an issued code to the account's contact address
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send a code to the identifier's registered address
    ///
    /// # Returns
    ///
    /// * `Ok(delivery_id)` - Provider-specific message identifier
    /// * `Err(reason)` - Delivery failed; the caller decides what to do with the code
    async fn send_code(&self, identifier: &str, code: &str) -> Result<String, String>;
}
