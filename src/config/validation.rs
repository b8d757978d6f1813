//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::app_config::{AccountConfig, GatewayConfig, TlsConfig};
use crate::config::AppConfig;
use crate::shared::error::WxPayError;

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::WxPayResult<()> {
        Self::validate_account(&config.account)?;
        Self::validate_gateway(&config.gateway)?;
        if let Some(tls) = &config.tls {
            Self::validate_tls(tls)?;
        }
        Self::validate_notify_path(&config.server.notify_path)?;
        Ok(())
    }

    /// Notification URLs are called by the gateway over the internet.
    fn validate_account(account: &AccountConfig) -> crate::WxPayResult<()> {
        if let Some(url) = &account.notify_url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(WxPayError::Validation(
                    "Notify URL must start with http:// or https://".to_string(),
                ));
            }
            if url.contains('?') {
                return Err(WxPayError::Validation(
                    "Notify URL must not carry query parameters".to_string(),
                ));
            }
            if url.starts_with("http://") {
                tracing::warn!("Notify URL is plain HTTP - notifications will travel unencrypted");
            }
        }
        Ok(())
    }

    fn validate_gateway(gateway: &GatewayConfig) -> crate::WxPayResult<()> {
        if gateway.domain.contains("://") || gateway.domain.contains('/') {
            return Err(WxPayError::Validation(
                "Gateway domain must be a bare host name".to_string(),
            ));
        }
        if gateway.connect_timeout_seconds > gateway.timeout_seconds {
            return Err(WxPayError::Validation(
                "Connect timeout cannot be greater than the overall timeout".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_tls(tls: &TlsConfig) -> crate::WxPayResult<()> {
        if tls.cert_path.as_os_str().is_empty() || tls.key_path.as_os_str().is_empty() {
            return Err(WxPayError::Validation(
                "TLS certificate and key paths must both be set".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_notify_path(path: &str) -> crate::WxPayResult<()> {
        if path.contains('/') || path.contains('?') {
            return Err(WxPayError::Validation(format!(
                "Notify path must be a single path segment: {}",
                path
            )));
        }
        Ok(())
    }
}
