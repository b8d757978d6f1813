//! Error handling module
//!
//! This module provides the error taxonomy shared by every layer of the crate.
//! Each failure surfaces as one specific kind so callers can pick a retry
//! policy without parsing message text.

use bytes::Bytes;
use thiserror::Error;

/// Failures owned by the transport collaborator.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The gateway answered with a status code >= 400. The body is kept for diagnostics.
    #[error("Response code: {status}")]
    Status { status: u16, body: Bytes },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TransportError::Client(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Malformed XML on the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("XML decode error at byte {position}: {reason}")]
pub struct DecodeError {
    pub position: u64,
    pub reason: String,
}

impl DecodeError {
    pub fn new(position: u64, reason: impl Into<String>) -> Self {
        Self {
            position,
            reason: reason.into(),
        }
    }
}

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum WxPayError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Malformed protocol response: {0}")]
    MalformedProtocol(String),

    /// `return_code=FAIL`; `return_msg` is the gateway's text, verbatim.
    #[error("{return_msg}")]
    CommFailure { return_msg: String },

    #[error("Invalid sign value in response")]
    SignatureInvalid,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl WxPayError {
    /// Gateway-supplied failure text, if this is a communication failure.
    pub fn return_msg(&self) -> Option<&str> {
        match self {
            WxPayError::CommFailure { return_msg } => Some(return_msg),
            _ => None,
        }
    }

    /// Whether the request never left the process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            WxPayError::Configuration(_) | WxPayError::Validation(_)
        )
    }
}

/// Application result type
pub type WxPayResult<T> = Result<T, WxPayError>;

impl From<config::ConfigError> for WxPayError {
    fn from(err: config::ConfigError) -> Self {
        WxPayError::Configuration(err.to_string())
    }
}

impl From<validator::ValidationErrors> for WxPayError {
    fn from(err: validator::ValidationErrors) -> Self {
        WxPayError::Validation(err.to_string())
    }
}

impl From<std::io::Error> for WxPayError {
    fn from(err: std::io::Error) -> Self {
        WxPayError::Configuration(err.to_string())
    }
}
