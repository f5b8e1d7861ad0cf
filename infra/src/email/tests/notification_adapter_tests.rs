use std::sync::Arc;

use flexify_core::services::password_reset::NotificationSender;

use crate::email::{EmailNotificationSender, MockEmailService};

#[tokio::test]
async fn test_adapter_delivers_code() {
    let mock = MockEmailService::default();
    let sender = EmailNotificationSender::new(Arc::new(mock.clone()));

    let message_id = sender.send_code("user@test.com", "483920").await.unwrap();

    assert!(message_id.starts_with("mock_"));
    assert_eq!(mock.last_code_for("user@test.com"), Some("483920".to_string()));
    assert_eq!(sender.provider_name(), "Mock");
}

#[tokio::test]
async fn test_adapter_maps_failure_to_reason() {
    let mock = MockEmailService::default();
    mock.set_simulate_failure(true);
    let sender = EmailNotificationSender::new(Arc::new(mock));

    let reason = sender.send_code("user@test.com", "483920").await.unwrap_err();
    assert!(reason.contains("Simulated email sending failure"));
}
