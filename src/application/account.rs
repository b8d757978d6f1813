//! Merchant identity shared read-only by every call

use crate::domain::{ParamSet, SignType, SignatureContext};

/// App id, merchant id and signing material for one merchant account.
#[derive(Debug, Clone)]
pub struct Account {
    app_id: String,
    mch_id: String,
    signature: SignatureContext,
    notify_url: Option<String>,
}

impl Account {
    /// Account signing with MD5 unless told otherwise.
    pub fn new(
        app_id: impl Into<String>,
        mch_id: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            mch_id: mch_id.into(),
            signature: SignatureContext::new(api_secret, SignType::default()),
            notify_url: None,
        }
    }

    pub fn with_sign_type(mut self, sign_type: SignType) -> Self {
        self.signature = self.signature.with_sign_type(sign_type);
        self
    }

    pub fn with_notify_url(mut self, notify_url: impl Into<String>) -> Self {
        self.notify_url = Some(notify_url.into());
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn mch_id(&self) -> &str {
        &self.mch_id
    }

    pub fn api_secret(&self) -> &str {
        self.signature.secret()
    }

    /// Default algorithm for requests that do not carry `sign_type`.
    pub fn sign_type(&self) -> SignType {
        self.signature.sign_type()
    }

    pub fn signature(&self) -> &SignatureContext {
        &self.signature
    }

    pub fn notify_url(&self) -> Option<&str> {
        self.notify_url.as_deref()
    }

    /// Sign `params` with this account's secret under `sign_type`.
    pub fn sign(&self, params: &ParamSet, sign_type: SignType) -> String {
        crate::domain::sign(params, self.signature.secret(), sign_type)
    }
}
