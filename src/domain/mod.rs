//! Domain layer - Parameter sets, signatures and response classification
//!
//! Everything here is a pure function over explicit inputs and is free of
//! transport or serialization concerns.

pub mod nonce;
pub mod params;
pub mod response;
pub mod signature;

pub use params::{
    ParamSet, FIELD_APPID, FIELD_MCH_ID, FIELD_NONCE_STR, FIELD_NOTIFY_URL, FIELD_RETURN_CODE,
    FIELD_RETURN_MSG, FIELD_SIGN, FIELD_SIGN_TYPE, RETURN_CODE_FAIL, RETURN_CODE_SUCCESS,
};
pub use response::ResponseOutcome;
pub use signature::{canonical_string, sign, verify, SignType, SignatureContext};
