//! Shared utilities and common functionality
//!
//! This module contains error handling and logging used across the crate.

pub mod error;
pub mod logging;

pub use error::{DecodeError, TransportError, WxPayError, WxPayResult};
pub use logging::LoggingUtils;
