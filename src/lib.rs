//! WxPay Gateway - Signed XML client and notification listener for the WeChat Pay v2 API
//!
//! This library builds signed merchant requests, sends them to the payment
//! gateway over HTTPS and validates the signed XML responses. A small HTTP
//! listener verifies asynchronous payment notifications.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

#[cfg(test)]
mod tests;

pub use application::{Account, GatewayApi, ResponseValidator, WxPayClient, WxPayClientBuilder};
pub use config::AppConfig;
pub use domain::{ParamSet, ResponseOutcome, SignType, SignatureContext};
pub use infrastructure::http::NotifyServer;
pub use infrastructure::transport::{HttpTransport, Transport};
pub use shared::error::{DecodeError, TransportError, WxPayError, WxPayResult};
