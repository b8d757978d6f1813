//! Canonical string construction and request/response signatures
//!
//! Both parties sign the same deterministic string: every non-empty field
//! except `sign`, sorted by key, joined as `k=v&`, followed by `key=<secret>`.

use crate::domain::params::{ParamSet, FIELD_SIGN};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Digest algorithm used for the `sign` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignType {
    #[default]
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "HMAC-SHA256")]
    HmacSha256,
}

impl SignType {
    /// Wire name carried in the `sign_type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Md5 => "MD5",
            SignType::HmacSha256 => "HMAC-SHA256",
        }
    }

    /// Length of the hex-encoded signature.
    pub fn hex_len(&self) -> usize {
        match self {
            SignType::Md5 => 32,
            SignType::HmacSha256 => 64,
        }
    }
}

impl std::fmt::Display for SignType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SignType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MD5" => Ok(SignType::Md5),
            "HMAC-SHA256" => Ok(SignType::HmacSha256),
            _ => Err(format!("unsupported sign type: {}", s)),
        }
    }
}

/// Build the byte string that gets hashed.
pub fn canonical_string(params: &ParamSet, secret: &str) -> String {
    let mut buf = String::with_capacity(params.len() * 16 + secret.len() + 4);
    for (key, value) in params.iter() {
        if key == FIELD_SIGN || value.is_empty() {
            continue;
        }
        buf.push_str(key);
        buf.push('=');
        buf.push_str(value);
        buf.push('&');
    }
    buf.push_str("key=");
    buf.push_str(secret);
    buf
}

/// Compute the upper-case hex signature of `params`.
pub fn sign(params: &ParamSet, secret: &str, sign_type: SignType) -> String {
    let canonical = canonical_string(params, secret);
    match sign_type {
        SignType::Md5 => hex::encode_upper(Md5::digest(canonical.as_bytes())),
        SignType::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
                .expect("HMAC accepts any key length");
            mac.update(canonical.as_bytes());
            hex::encode_upper(mac.finalize().into_bytes())
        }
    }
}

/// Check the `sign` field of `params` against a freshly computed signature.
///
/// A set without `sign` is never valid. The comparison is case-sensitive.
pub fn verify(params: &ParamSet, secret: &str, sign_type: SignType) -> bool {
    let Some(given) = params.get(FIELD_SIGN) else {
        return false;
    };
    let expected = sign(params, secret, sign_type);
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Shared secret paired with an algorithm.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureContext {
    secret: String,
    sign_type: SignType,
}

impl SignatureContext {
    pub fn new(secret: impl Into<String>, sign_type: SignType) -> Self {
        Self {
            secret: secret.into(),
            sign_type,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    /// Same secret, different algorithm.
    pub fn with_sign_type(&self, sign_type: SignType) -> Self {
        Self {
            secret: self.secret.clone(),
            sign_type,
        }
    }

    pub fn sign(&self, params: &ParamSet) -> String {
        sign(params, &self.secret, self.sign_type)
    }

    pub fn verify(&self, params: &ParamSet) -> bool {
        verify(params, &self.secret, self.sign_type)
    }
}

impl std::fmt::Debug for SignatureContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureContext")
            .field("secret", &"<redacted>")
            .field("sign_type", &self.sign_type)
            .finish()
    }
}
