//! Staged construction of signed gateway requests
//!
//! `RequestBuilder` (open) → [`FilledRequest`] → [`SignedRequest`] →
//! [`SealedRequest`]. Each stage consumes the previous one, and nothing after
//! `sign` exposes a mutator, so a signed request cannot drift from its
//! signature.

use crate::application::account::Account;
use crate::domain::nonce::{self, DEFAULT_NONCE_LENGTH};
use crate::domain::{
    ParamSet, SignType, FIELD_APPID, FIELD_MCH_ID, FIELD_NONCE_STR, FIELD_SIGN, FIELD_SIGN_TYPE,
};
use crate::infrastructure::xml;
use crate::shared::error::{WxPayError, WxPayResult};
use bytes::Bytes;
use tracing::debug;

/// Open stage: caller fields, still mutable.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    account: &'a Account,
    params: ParamSet,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(account: &'a Account, params: ParamSet) -> Self {
        Self { account, params }
    }

    /// Set a field, replacing any previous value.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Set a field only if the caller has not.
    pub fn default_field(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        self.params.insert_if_absent(key, || value);
        self
    }

    /// Add identity fields, nonce and sign type wherever the caller left them out.
    pub fn fill(self) -> WxPayResult<FilledRequest<'a>> {
        let Self { account, mut params } = self;

        if let Some(key) = params.keys().find(|key| !xml::is_element_name(key)) {
            return Err(WxPayError::Validation(format!(
                "field name is not a valid XML element name: {:?}",
                key
            )));
        }
        // An empty sign_type counts as unset, like any other empty field.
        if params.get(FIELD_SIGN_TYPE) == Some("") {
            params.remove(FIELD_SIGN_TYPE);
        }

        params.insert_if_absent(FIELD_APPID, || account.app_id().to_string());
        params.insert_if_absent(FIELD_MCH_ID, || account.mch_id().to_string());
        params.insert_if_absent(FIELD_NONCE_STR, || nonce::generate(DEFAULT_NONCE_LENGTH));
        params.insert_if_absent(FIELD_SIGN_TYPE, || account.sign_type().as_str().to_string());

        let sign_type = params
            .get(FIELD_SIGN_TYPE)
            .unwrap_or_default()
            .parse::<SignType>()
            .map_err(WxPayError::Validation)?;

        Ok(FilledRequest {
            account,
            params,
            sign_type,
        })
    }
}

/// Every field final; only the signature is missing.
#[derive(Debug)]
pub struct FilledRequest<'a> {
    account: &'a Account,
    params: ParamSet,
    sign_type: SignType,
}

impl FilledRequest<'_> {
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    /// Compute and insert `sign`. This is the last mutation a request sees.
    pub fn sign(self) -> SignedRequest {
        let Self {
            account,
            mut params,
            sign_type,
        } = self;

        let signature = account.sign(&params, sign_type);
        params.insert(FIELD_SIGN, signature);
        debug!(sign_type = %sign_type, fields = params.len(), "Request signed");

        SignedRequest { params, sign_type }
    }
}

/// Read-only view of a signed request.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    params: ParamSet,
    sign_type: SignType,
}

impl SignedRequest {
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    pub fn nonce(&self) -> &str {
        self.params.get(FIELD_NONCE_STR).unwrap_or_default()
    }

    pub fn signature(&self) -> &str {
        self.params.get(FIELD_SIGN).unwrap_or_default()
    }

    /// Serialize to the wire body.
    pub fn seal(self) -> SealedRequest {
        let body = xml::encode(&self.params);
        let nonce = self.nonce().to_string();
        SealedRequest {
            body,
            sign_type: self.sign_type,
            nonce,
        }
    }
}

/// Wire bytes plus what the response check needs to know about the request.
#[derive(Debug, Clone)]
pub struct SealedRequest {
    body: Bytes,
    sign_type: SignType,
    nonce: String,
}

impl SealedRequest {
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Algorithm the request was signed with; responses are verified with it.
    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }
}
