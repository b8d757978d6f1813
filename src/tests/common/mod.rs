//! Common test utilities and mock implementations
//!
//! This module provides shared utilities, mocks, and fixtures used across
//! all test modules.

use crate::{
    application::WxPayClient,
    domain::{sign, ParamSet, SignType},
    infrastructure::{transport::Transport, xml},
    shared::error::TransportError,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One request as seen by the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub host: String,
    pub path: String,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Decode the posted XML body.
    pub fn params(&self) -> ParamSet {
        xml::decode(&self.body).expect("request body is well-formed XML")
    }
}

/// Mock gateway transport: records every request and plays back scripted replies.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Bytes, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply body
    pub fn push_reply(&self, body: impl Into<Bytes>) {
        self.replies.lock().unwrap().push_back(Ok(body.into()));
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Number of requests sent so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, host: &str, path: &str, body: Bytes) -> Result<Bytes, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            host: host.to_string(),
            path: path.to_string(),
            body,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted reply".to_string())))
    }
}

/// Build a client around mock transports.
pub fn mock_client(
    transport: Arc<MockTransport>,
    tls_transport: Option<Arc<MockTransport>>,
) -> WxPayClient {
    let mut builder = WxPayClient::builder(fixtures::APP_ID, fixtures::MCH_ID, fixtures::API_SECRET)
        .notify_url(fixtures::NOTIFY_URL)
        .transport(transport);
    if let Some(tls) = tls_transport {
        builder = builder.tls_transport(tls);
    }
    builder.build().expect("mock client builds")
}

/// Test fixtures and sample data
pub mod fixtures {
    use super::*;

    pub const APP_ID: &str = "wx2421b1c4370ec43b";
    pub const MCH_ID: &str = "10000100";
    pub const API_SECRET: &str = "192006250b4c09247ec02edce69f6a2d";
    pub const NOTIFY_URL: &str = "https://merchant.example.com/notify";

    /// Business fields of a typical order query.
    pub fn order_query_params() -> ParamSet {
        ParamSet::new().with("out_trade_no", "1415757673")
    }

    /// Signed gateway reply carrying `fields` plus a SUCCESS return code.
    pub fn signed_success(fields: ParamSet, sign_type: SignType) -> Bytes {
        let mut params = fields
            .with("return_code", "SUCCESS")
            .with("return_msg", "OK")
            .with("appid", APP_ID)
            .with("mch_id", MCH_ID)
            .with("nonce_str", "IITRi8Iabbblz1Jc");
        let signature = sign(&params, API_SECRET, sign_type);
        params.insert("sign", signature);
        xml::encode(&params)
    }

    /// Unsigned communication failure.
    pub fn comm_failure(return_msg: &str) -> Bytes {
        xml::encode(
            &ParamSet::new()
                .with("return_code", "FAIL")
                .with("return_msg", return_msg),
        )
    }

    /// Order query result fields.
    pub fn paid_order() -> ParamSet {
        ParamSet::new()
            .with("result_code", "SUCCESS")
            .with("trade_state", "SUCCESS")
            .with("out_trade_no", "1415757673")
            .with("transaction_id", "1008450740201411110005820873")
            .with("total_fee", "1")
    }
}

/// Custom assertions
pub mod assertions {
    use super::*;

    /// Assert the request carries the envelope fields and a valid signature.
    pub fn assert_signed_envelope(params: &ParamSet, sign_type: SignType) {
        assert_eq!(params.get("appid"), Some(fixtures::APP_ID));
        assert_eq!(params.get("mch_id"), Some(fixtures::MCH_ID));
        assert_eq!(params.get("sign_type"), Some(sign_type.as_str()));
        assert_eq!(params.get("nonce_str").map(str::len), Some(32));
        assert_valid_hex(params.get("sign").unwrap_or_default(), sign_type.hex_len());
        assert!(crate::domain::verify(params, fixtures::API_SECRET, sign_type));
    }

    /// Assert uppercase hex of the given length
    pub fn assert_valid_hex(hex: &str, expected_length: usize) {
        assert_eq!(hex.len(), expected_length);
        assert!(hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }
}
