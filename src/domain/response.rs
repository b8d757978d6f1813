//! Classification of gateway responses and notifications

use crate::domain::params::ParamSet;
use crate::shared::error::WxPayError;

/// Terminal state of response validation.
///
/// Only [`ResponseOutcome::Valid`] carries the parsed business fields; the
/// other states carry diagnostic text at most.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// `return_code=SUCCESS` and the signature matched.
    Valid(ParamSet),
    /// `return_code=FAIL`; holds `return_msg` verbatim.
    CommFailure(String),
    /// Undecodable body, missing or unrecognized `return_code`.
    MalformedProtocol(String),
    /// `return_code=SUCCESS` but the signature did not match.
    SignatureInvalid,
}

impl ResponseOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ResponseOutcome::Valid(_))
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseOutcome::Valid(_) => "valid",
            ResponseOutcome::CommFailure(_) => "comm_failure",
            ResponseOutcome::MalformedProtocol(_) => "malformed_protocol",
            ResponseOutcome::SignatureInvalid => "signature_invalid",
        }
    }

    pub fn into_result(self) -> Result<ParamSet, WxPayError> {
        match self {
            ResponseOutcome::Valid(fields) => Ok(fields),
            ResponseOutcome::CommFailure(return_msg) => Err(WxPayError::CommFailure { return_msg }),
            ResponseOutcome::MalformedProtocol(reason) => Err(WxPayError::MalformedProtocol(reason)),
            ResponseOutcome::SignatureInvalid => Err(WxPayError::SignatureInvalid),
        }
    }
}

impl From<ResponseOutcome> for Result<ParamSet, WxPayError> {
    fn from(outcome: ResponseOutcome) -> Self {
        outcome.into_result()
    }
}
