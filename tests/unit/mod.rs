
// Unit tests for mock services
mod export_service_test;
mod feedback_service_test;
mod history_service_test;
mod quick_action_service_test;

// Unit tests for configuration and translations
mod config_test;
mod i18n_test;
