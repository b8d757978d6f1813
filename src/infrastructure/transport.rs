//! HTTPS transport to the payment gateway
//!
//! The client core only needs `send(host, path, body) -> bytes`; this module
//! provides that capability over reqwest, in a server-authenticated flavour
//! and a mutual-TLS flavour carrying the merchant's API certificate.

use crate::shared::error::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;

/// Connect timeout for a single attempt.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(6);
/// Deadline for the whole exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);
/// Idle connections kept per host.
pub const DEFAULT_MAX_IDLE_PER_HOST: usize = 2;

/// Capability to POST a signed body and return the response body.
///
/// Implementations must return either bytes or an error in bounded time and
/// surface HTTP status codes >= 400 as [`TransportError::Status`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, host: &str, path: &str, body: Bytes) -> Result<Bytes, TransportError>;
}

/// Timeouts and pooling shared by both transport flavours.
#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_idle_per_host: usize,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            max_idle_per_host: DEFAULT_MAX_IDLE_PER_HOST,
        }
    }
}

/// PEM material for the mutual-TLS client.
#[derive(Clone)]
pub struct ClientCertificate {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
    /// Replaces the built-in roots when present.
    pub root_ca_pem: Option<Vec<u8>>,
}

impl std::fmt::Debug for ClientCertificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCertificate")
            .field("cert_pem", &format_args!("{} bytes", self.cert_pem.len()))
            .field("key_pem", &"<redacted>")
            .field("custom_root_ca", &self.root_ca_pem.is_some())
            .finish()
    }
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    mutual_tls: bool,
}

impl HttpTransport {
    /// Server-authenticated TLS only.
    pub fn new(options: TransportOptions) -> Result<Self, TransportError> {
        let client = Self::client_builder(options).build()?;
        Ok(Self {
            client,
            mutual_tls: false,
        })
    }

    /// Mutual TLS with the merchant API certificate.
    pub fn with_client_certificate(
        options: TransportOptions,
        certificate: &ClientCertificate,
    ) -> Result<Self, TransportError> {
        let mut identity_pem =
            Vec::with_capacity(certificate.cert_pem.len() + certificate.key_pem.len() + 1);
        identity_pem.extend_from_slice(&certificate.cert_pem);
        identity_pem.push(b'\n');
        identity_pem.extend_from_slice(&certificate.key_pem);

        let identity = reqwest::Identity::from_pem(&identity_pem)
            .map_err(|e| TransportError::Client(format!("Invalid client certificate: {}", e)))?;

        let mut builder = Self::client_builder(options).identity(identity);

        if let Some(root_ca) = certificate.root_ca_pem.as_deref() {
            let roots = reqwest::Certificate::from_pem_bundle(root_ca)
                .map_err(|e| TransportError::Client(format!("Failed to parse root certificate: {}", e)))?;
            if roots.is_empty() {
                return Err(TransportError::Client(
                    "Failed to parse root certificate".to_string(),
                ));
            }
            builder = builder.tls_built_in_root_certs(false);
            for root in roots {
                builder = builder.add_root_certificate(root);
            }
        }

        let client = builder.build()?;
        Ok(Self {
            client,
            mutual_tls: true,
        })
    }

    pub fn is_mutual_tls(&self) -> bool {
        self.mutual_tls
    }

    fn client_builder(options: TransportOptions) -> reqwest::ClientBuilder {
        reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .pool_max_idle_per_host(options.max_idle_per_host)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, host: &str, path: &str, body: Bytes) -> Result<Bytes, TransportError> {
        let url = gateway_url(host, path);
        debug!(url = %url, bytes = body.len(), mutual_tls = self.mutual_tls, "POST");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.as_u16() >= 400 {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

/// `https://{host}{path}`
pub fn gateway_url(host: &str, path: &str) -> String {
    format!("https://{}{}", host.trim_end_matches('/'), path)
}
