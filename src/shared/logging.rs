//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.
//! Secrets and signature inputs never pass through here.

use crate::domain::{ResponseOutcome, SignType};
use tracing::{debug, error, info, warn};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    pub fn initialize(level: &str, format: &str, structured: bool) -> crate::WxPayResult<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(structured)
            .with_thread_names(structured)
            .with_file(structured)
            .with_line_number(structured)
            .with_ansi(false);

        let result = if format.eq_ignore_ascii_case("compact") {
            tracing::subscriber::set_global_default(builder.compact().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| {
            crate::WxPayError::Configuration(format!("Failed to initialize logging: {}", e))
        })
    }

    /// Log an outgoing gateway request
    pub fn log_request(api: &str, host: &str, path: &str, sign_type: SignType, nonce: &str) {
        info!(
            api = %api,
            host = %host,
            path = %path,
            sign_type = %sign_type,
            nonce_str = %nonce,
            "Sending gateway request"
        );
    }

    /// Log the classification of a gateway response or notification
    pub fn log_outcome(api: &str, nonce: &str, outcome: &ResponseOutcome) {
        match outcome {
            ResponseOutcome::Valid(fields) => debug!(
                api = %api,
                nonce_str = %nonce,
                fields = fields.len(),
                "Gateway response validated"
            ),
            ResponseOutcome::CommFailure(return_msg) => warn!(
                api = %api,
                nonce_str = %nonce,
                return_msg = %return_msg,
                "Gateway reported communication failure"
            ),
            ResponseOutcome::MalformedProtocol(reason) => error!(
                api = %api,
                nonce_str = %nonce,
                reason = %reason,
                "Malformed gateway response"
            ),
            ResponseOutcome::SignatureInvalid => error!(
                api = %api,
                nonce_str = %nonce,
                "Gateway response signature mismatch"
            ),
        }
    }

    /// Log a transport-level failure
    pub fn log_transport_error(api: &str, nonce: &str, error: &crate::TransportError) {
        error!(
            api = %api,
            nonce_str = %nonce,
            error = %error,
            "Gateway request failed"
        );
    }
}
