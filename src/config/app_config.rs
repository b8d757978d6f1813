//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use crate::domain::SignType;
use crate::infrastructure::transport::{TransportOptions, DEFAULT_MAX_IDLE_PER_HOST};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

/// Merchant account configuration
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct AccountConfig {
    /// Application id bound to the merchant
    #[validate(length(min = 1))]
    pub app_id: String,

    /// Merchant id
    #[validate(length(min = 1))]
    pub mch_id: String,

    /// API secret shared with the gateway
    #[validate(length(min = 1))]
    pub api_secret: String,

    /// Default signing algorithm
    #[serde(default)]
    pub sign_type: SignType,

    /// Default payment notification URL
    #[validate(url)]
    pub notify_url: Option<String>,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("app_id", &self.app_id)
            .field("mch_id", &self.mch_id)
            .field("api_secret", &"<redacted>")
            .field("sign_type", &self.sign_type)
            .field("notify_url", &self.notify_url)
            .finish()
    }
}

/// Gateway connectivity configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GatewayConfig {
    /// Gateway host
    #[validate(length(min = 1))]
    pub domain: String,

    /// Connect timeout in seconds
    #[validate(range(min = 1, max = 60))]
    pub connect_timeout_seconds: u64,

    /// Overall request deadline in seconds
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,

    /// Idle connections kept per host
    #[validate(range(max = 64))]
    pub max_idle_per_host: usize,
}

impl GatewayConfig {
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_seconds),
            timeout: Duration::from_secs(self.timeout_seconds),
            max_idle_per_host: self.max_idle_per_host,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            domain: crate::application::DOMAIN_API.to_string(),
            connect_timeout_seconds: 6,
            timeout_seconds: 8,
            max_idle_per_host: DEFAULT_MAX_IDLE_PER_HOST,
        }
    }
}

/// API certificate for secured calls (refund, reverse)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    /// PEM client certificate
    pub cert_path: PathBuf,

    /// PEM private key
    pub key_path: PathBuf,

    /// PEM root CA bundle; system roots are used when absent
    pub root_ca_path: Option<PathBuf>,
}

/// Notification listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port; 0 binds an ephemeral port
    #[validate(range(min = 0, max = 65535))]
    pub port: u16,

    /// Path segment the gateway posts notifications to
    #[validate(length(min = 1))]
    pub notify_path: String,

    /// Maximum notification size in bytes
    #[validate(range(min = 1024, max = 1048576))] // 1KB to 1MB
    pub max_request_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format ("full" or "compact")
    #[validate(length(min = 1))]
    pub format: String,

    /// Include thread and source location in every event
    pub structured: bool,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Merchant account
    pub account: AccountConfig,

    /// Gateway connectivity
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// API certificate
    #[serde(default)]
    pub tls: Option<TlsConfig>,

    /// Notification listener
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            account: AccountConfig {
                app_id: "wx2421b1c4370ec43b".to_string(),
                mch_id: "10000100".to_string(),
                api_secret: "change-me-to-the-merchant-api-key".to_string(),
                sign_type: SignType::Md5,
                notify_url: None,
            },
            gateway: GatewayConfig::default(),
            tls: None,
            server: ServerConfig {
                bind_address: IpAddr::from([127, 0, 0, 1]),
                port: 8080,
                notify_path: "notify".to_string(),
                max_request_size: 64 * 1024,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "full".to_string(),
                structured: true,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::WxPayResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("WxPay").required(false))
            .add_source(config::Environment::with_prefix("WXPAY").separator("__"))
            .build()
            .map_err(|e| {
                crate::WxPayError::Configuration(format!("Failed to build configuration: {}", e))
            })?;

        let config: AppConfig = config.try_deserialize().map_err(|e| {
            crate::WxPayError::Configuration(format!("Failed to deserialize configuration: {}", e))
        })?;

        config.validate_config().map_err(|e| {
            crate::WxPayError::Validation(format!("Configuration validation failed: {}", e))
        })?;
        crate::config::ConfigValidator::validate_config(&config)?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.account.validate()?;
        self.gateway.validate()?;
        self.server.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}
