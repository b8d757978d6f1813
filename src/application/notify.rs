//! Payment and refund notifications pushed by the gateway
//!
//! Notifications use the same flat XML envelope as responses and are checked
//! with the same state machine. The merchant acknowledges with a small
//! `return_code`/`return_msg` document.

use crate::application::account::Account;
use crate::application::response_validator::ResponseValidator;
use crate::domain::{
    ParamSet, ResponseOutcome, FIELD_RETURN_CODE, FIELD_RETURN_MSG, RETURN_CODE_FAIL,
    RETURN_CODE_SUCCESS,
};
use crate::infrastructure::xml;
use crate::shared::error::DecodeError;
use bytes::Bytes;

/// Decode a notification body without checking it.
pub fn parse_notify(body: &[u8]) -> Result<ParamSet, DecodeError> {
    xml::decode(body)
}

/// Acknowledgement telling the gateway to stop redelivering.
pub fn notify_reply_success() -> Bytes {
    xml::encode(
        &ParamSet::new()
            .with(FIELD_RETURN_CODE, RETURN_CODE_SUCCESS)
            .with(FIELD_RETURN_MSG, "OK"),
    )
}

/// Negative acknowledgement; the gateway will redeliver later.
pub fn notify_reply_fail(message: &str) -> Bytes {
    xml::encode(
        &ParamSet::new()
            .with(FIELD_RETURN_CODE, RETURN_CODE_FAIL)
            .with(FIELD_RETURN_MSG, message),
    )
}

impl Account {
    /// Decode and classify a notification with this account's secret and
    /// default sign type.
    pub fn verify_notification(&self, body: &[u8]) -> ResponseOutcome {
        ResponseValidator::new(self.signature()).validate(body)
    }
}
