//! Test suite for the WxPay gateway
//!
//! This module provides a testing framework covering:
//! - Unit tests for signing, the wire codec and the request pipeline
//! - Integration tests driving the client against a scripted transport
//! - Mock and fixture utilities

pub mod common;
pub mod unit;

/// Test configuration and utilities
pub mod config {
    use crate::config::AppConfig;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            // Route tracing output through the test harness; another test
            // binary may already own the global subscriber.
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    /// Create test configuration
    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();

        config.server.port = 0; // Use random port
        config.server.bind_address = "127.0.0.1".parse().unwrap();
        config.account.api_secret = super::common::fixtures::API_SECRET.to_string();
        config.account.notify_url = Some("https://merchant.example.com/notify".to_string());

        config
    }
}

/// Test result types
pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_initialization() {
        config::init();
        let test_config = config::test_config();
        assert_eq!(test_config.server.port, 0);
        assert!(test_config.validate_config().is_ok());
        assert!(crate::config::ConfigValidator::validate_config(&test_config).is_ok());
    }
}
