//! Response validation state machine
//!
//! Received → Parsed → return_code checked → signature checked. Each step
//! either advances or lands in a terminal [`ResponseOutcome`].

use crate::domain::{
    ParamSet, ResponseOutcome, SignatureContext, RETURN_CODE_FAIL, RETURN_CODE_SUCCESS,
};
use crate::infrastructure::xml;

/// Classifies gateway responses for one secret/algorithm pair.
///
/// The algorithm must be the one the *request* was signed with; the gateway
/// does not reliably echo it back.
#[derive(Debug, Clone, Copy)]
pub struct ResponseValidator<'a> {
    signature: &'a SignatureContext,
}

impl<'a> ResponseValidator<'a> {
    pub fn new(signature: &'a SignatureContext) -> Self {
        Self { signature }
    }

    /// Decode raw response bytes and classify them.
    pub fn validate(&self, body: &[u8]) -> ResponseOutcome {
        match xml::decode(body) {
            Ok(params) => self.classify(params),
            Err(e) => ResponseOutcome::MalformedProtocol(e.to_string()),
        }
    }

    /// Classify an already decoded response.
    pub fn classify(&self, params: ParamSet) -> ResponseOutcome {
        let Some(return_code) = params.return_code() else {
            return ResponseOutcome::MalformedProtocol("no return_code in response".to_string());
        };

        match return_code {
            RETURN_CODE_FAIL => {
                ResponseOutcome::CommFailure(params.return_msg().unwrap_or_default().to_string())
            }
            RETURN_CODE_SUCCESS => {
                if self.signature.verify(&params) {
                    ResponseOutcome::Valid(params)
                } else {
                    ResponseOutcome::SignatureInvalid
                }
            }
            other => ResponseOutcome::MalformedProtocol(format!(
                "invalid return_code value: {}",
                other
            )),
        }
    }
}
