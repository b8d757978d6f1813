//! Application layer - Request envelopes, response validation and the gateway client
//!
//! This module orchestrates the domain primitives and the infrastructure
//! codec/transport into complete gateway calls.

pub mod account;
pub mod client;
pub mod notify;
pub mod request_builder;
pub mod response_validator;

pub use account::Account;
pub use client::{GatewayApi, WxPayClient, WxPayClientBuilder, DOMAIN_API, DOMAIN_API2};
pub use notify::{notify_reply_fail, notify_reply_success, parse_notify};
pub use request_builder::{FilledRequest, RequestBuilder, SealedRequest, SignedRequest};
pub use response_validator::ResponseValidator;
