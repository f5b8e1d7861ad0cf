mod notification_adapter_tests;
