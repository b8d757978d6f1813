//! Gateway client: one method per merchant API endpoint
//!
//! Every call runs the same envelope: secured-transport guard → fill and sign
//! → XML → transport → response validation with the request's sign type.

use crate::application::account::Account;
use crate::application::request_builder::{RequestBuilder, SealedRequest};
use crate::application::response_validator::ResponseValidator;
use crate::config::AppConfig;
use crate::domain::{ParamSet, ResponseOutcome, SignType, FIELD_NOTIFY_URL};
use crate::infrastructure::transport::{ClientCertificate, HttpTransport, Transport};
use crate::shared::error::{WxPayError, WxPayResult};
use crate::shared::logging::LoggingUtils;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{info, instrument};

/// Primary gateway host.
pub const DOMAIN_API: &str = "api.mch.weixin.qq.com";
/// Backup gateway host.
pub const DOMAIN_API2: &str = "api2.mch.weixin.qq.com";

/// Merchant API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayApi {
    MicroPay,
    UnifiedOrder,
    OrderQuery,
    Reverse,
    CloseOrder,
    Refund,
    RefundQuery,
    DownloadBill,
    DownloadFundflow,
    ShortUrl,
    AuthCodeToOpenid,
}

impl GatewayApi {
    pub fn path(&self) -> &'static str {
        match self {
            GatewayApi::MicroPay => "/pay/micropay",
            GatewayApi::UnifiedOrder => "/pay/unifiedorder",
            GatewayApi::OrderQuery => "/pay/orderquery",
            GatewayApi::Reverse => "/secapi/pay/reverse",
            GatewayApi::CloseOrder => "/pay/closeorder",
            GatewayApi::Refund => "/secapi/pay/refund",
            GatewayApi::RefundQuery => "/pay/refundquery",
            GatewayApi::DownloadBill => "/pay/downloadbill",
            GatewayApi::DownloadFundflow => "/pay/downloadfundflow",
            GatewayApi::ShortUrl => "/tools/shorturl",
            GatewayApi::AuthCodeToOpenid => "/tools/authcodetoopenid",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GatewayApi::MicroPay => "micropay",
            GatewayApi::UnifiedOrder => "unifiedorder",
            GatewayApi::OrderQuery => "orderquery",
            GatewayApi::Reverse => "reverse",
            GatewayApi::CloseOrder => "closeorder",
            GatewayApi::Refund => "refund",
            GatewayApi::RefundQuery => "refundquery",
            GatewayApi::DownloadBill => "downloadbill",
            GatewayApi::DownloadFundflow => "downloadfundflow",
            GatewayApi::ShortUrl => "shorturl",
            GatewayApi::AuthCodeToOpenid => "authcodetoopenid",
        }
    }

    /// Requires the mutual-TLS transport.
    pub fn is_secured(&self) -> bool {
        matches!(self, GatewayApi::Reverse | GatewayApi::Refund)
    }

    /// Response body is a file, not a signed XML document.
    pub fn returns_raw(&self) -> bool {
        matches!(self, GatewayApi::DownloadBill | GatewayApi::DownloadFundflow)
    }
}

impl std::fmt::Display for GatewayApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder mirroring the options a merchant sets once at start-up.
pub struct WxPayClientBuilder {
    account: Account,
    domain: String,
    transport: Option<Arc<dyn Transport>>,
    tls_transport: Option<Arc<dyn Transport>>,
}

impl WxPayClientBuilder {
    pub fn sign_type(mut self, sign_type: SignType) -> Self {
        self.account = self.account.with_sign_type(sign_type);
        self
    }

    pub fn notify_url(mut self, notify_url: impl Into<String>) -> Self {
        self.account = self.account.with_notify_url(notify_url);
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Transport for ordinary calls.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Transport carrying the API certificate. Without it secured calls fail.
    pub fn tls_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.tls_transport = Some(transport);
        self
    }

    pub fn build(self) -> WxPayResult<WxPayClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(Default::default())?) as Arc<dyn Transport>,
        };
        Ok(WxPayClient {
            account: Arc::new(self.account),
            domain: self.domain,
            transport,
            tls_transport: self.tls_transport,
        })
    }
}

/// Signed-envelope client for the merchant API.
#[derive(Clone)]
pub struct WxPayClient {
    account: Arc<Account>,
    domain: String,
    transport: Arc<dyn Transport>,
    tls_transport: Option<Arc<dyn Transport>>,
}

impl WxPayClient {
    pub fn builder(
        app_id: impl Into<String>,
        mch_id: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> WxPayClientBuilder {
        WxPayClientBuilder {
            account: Account::new(app_id, mch_id, api_secret),
            domain: DOMAIN_API.to_string(),
            transport: None,
            tls_transport: None,
        }
    }

    /// Build the account and both transports from configuration.
    pub fn from_config(config: &AppConfig) -> WxPayResult<Self> {
        let options = config.gateway.transport_options();
        let mut builder = Self::builder(
            &config.account.app_id,
            &config.account.mch_id,
            &config.account.api_secret,
        )
        .sign_type(config.account.sign_type)
        .domain(&config.gateway.domain)
        .transport(Arc::new(HttpTransport::new(options)?));

        if let Some(notify_url) = &config.account.notify_url {
            builder = builder.notify_url(notify_url);
        }

        if let Some(tls) = &config.tls {
            let certificate = ClientCertificate {
                cert_pem: read_pem(&tls.cert_path)?,
                key_pem: read_pem(&tls.key_path)?,
                root_ca_pem: tls.root_ca_path.as_deref().map(read_pem).transpose()?,
            };
            let transport = HttpTransport::with_client_certificate(options, &certificate)?;
            info!("Mutual-TLS transport configured");
            builder = builder.tls_transport(Arc::new(transport));
        }

        builder.build()
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Shared handle to the account, e.g. for the notification listener.
    pub fn shared_account(&self) -> Arc<Account> {
        Arc::clone(&self.account)
    }

    /// Default sign type of this merchant account.
    pub fn sign_type(&self) -> SignType {
        self.account.sign_type()
    }

    pub fn api_secret(&self) -> &str {
        self.account.api_secret()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn has_tls_transport(&self) -> bool {
        self.tls_transport.is_some()
    }

    /// Sign, send and validate a call whose response is a signed document.
    #[instrument(skip(self, params))]
    pub async fn call(&self, api: GatewayApi, params: ParamSet) -> WxPayResult<ParamSet> {
        Self::expect_document(api)?;
        let transport = self.transport_for(api)?;
        let sealed = self.seal(api, params)?;
        let body = self.send(transport, api, &sealed).await?;

        let signature = self.account.signature().with_sign_type(sealed.sign_type());
        let outcome = ResponseValidator::new(&signature).validate(&body);
        LoggingUtils::log_outcome(api.name(), sealed.nonce(), &outcome);
        outcome.into_result()
    }

    /// Sign and send a call, returning the response bytes untouched.
    #[instrument(skip(self, params))]
    pub async fn call_raw(&self, api: GatewayApi, params: ParamSet) -> WxPayResult<Bytes> {
        let transport = self.transport_for(api)?;
        let sealed = self.seal(api, params)?;
        self.send(transport, api, &sealed).await
    }

    /// Sign, send and return the classification without converting it to an error.
    pub async fn call_outcome(
        &self,
        api: GatewayApi,
        params: ParamSet,
    ) -> WxPayResult<ResponseOutcome> {
        Self::expect_document(api)?;
        let transport = self.transport_for(api)?;
        let sealed = self.seal(api, params)?;
        let body = self.send(transport, api, &sealed).await?;
        let signature = self.account.signature().with_sign_type(sealed.sign_type());
        Ok(ResponseValidator::new(&signature).validate(&body))
    }

    /// Pay with a customer's payment code.
    pub async fn micro_pay(&self, params: ParamSet) -> WxPayResult<ParamSet> {
        self.call(GatewayApi::MicroPay, params).await
    }

    /// Unified order. Falls back to the account's notify URL.
    pub async fn unified_order(&self, params: ParamSet) -> WxPayResult<ParamSet> {
        self.call(GatewayApi::UnifiedOrder, params).await
    }

    pub async fn order_query(&self, params: ParamSet) -> WxPayResult<ParamSet> {
        self.call(GatewayApi::OrderQuery, params).await
    }

    /// Reverse a micropay order. Needs the API certificate.
    pub async fn reverse(&self, params: ParamSet) -> WxPayResult<ParamSet> {
        self.call(GatewayApi::Reverse, params).await
    }

    pub async fn close_order(&self, params: ParamSet) -> WxPayResult<ParamSet> {
        self.call(GatewayApi::CloseOrder, params).await
    }

    /// Request a refund. Needs the API certificate.
    pub async fn refund(&self, params: ParamSet) -> WxPayResult<ParamSet> {
        self.call(GatewayApi::Refund, params).await
    }

    pub async fn refund_query(&self, params: ParamSet) -> WxPayResult<ParamSet> {
        self.call(GatewayApi::RefundQuery, params).await
    }

    /// Trade bill; the gateway answers with the file body.
    pub async fn download_bill(&self, params: ParamSet) -> WxPayResult<Bytes> {
        self.call_raw(GatewayApi::DownloadBill, params).await
    }

    /// Fund flow bill; the gateway answers with the file body.
    pub async fn download_fundflow(&self, params: ParamSet) -> WxPayResult<Bytes> {
        self.call_raw(GatewayApi::DownloadFundflow, params).await
    }

    pub async fn short_url(&self, params: ParamSet) -> WxPayResult<ParamSet> {
        self.call(GatewayApi::ShortUrl, params).await
    }

    pub async fn auth_code_to_openid(&self, params: ParamSet) -> WxPayResult<ParamSet> {
        self.call(GatewayApi::AuthCodeToOpenid, params).await
    }

    /// File downloads have no signed document to validate.
    fn expect_document(api: GatewayApi) -> WxPayResult<()> {
        if api.returns_raw() {
            return Err(WxPayError::Validation(format!(
                "{} returns a file; use call_raw",
                api
            )));
        }
        Ok(())
    }

    fn transport_for(&self, api: GatewayApi) -> WxPayResult<&Arc<dyn Transport>> {
        if !api.is_secured() {
            return Ok(&self.transport);
        }
        self.tls_transport.as_ref().ok_or_else(|| {
            WxPayError::Configuration(format!(
                "{} requires the API certificate but no mutual-TLS transport is configured",
                api
            ))
        })
    }

    fn seal(&self, api: GatewayApi, params: ParamSet) -> WxPayResult<SealedRequest> {
        let mut builder = RequestBuilder::new(&self.account, params);
        if api == GatewayApi::UnifiedOrder {
            if let Some(notify_url) = self.account.notify_url() {
                builder = builder.default_field(FIELD_NOTIFY_URL, notify_url);
            }
        }
        Ok(builder.fill()?.sign().seal())
    }

    async fn send(
        &self,
        transport: &Arc<dyn Transport>,
        api: GatewayApi,
        sealed: &SealedRequest,
    ) -> WxPayResult<Bytes> {
        LoggingUtils::log_request(
            api.name(),
            &self.domain,
            api.path(),
            sealed.sign_type(),
            sealed.nonce(),
        );
        transport
            .send(&self.domain, api.path(), sealed.body().clone())
            .await
            .map_err(|e| {
                LoggingUtils::log_transport_error(api.name(), sealed.nonce(), &e);
                WxPayError::from(e)
            })
    }
}

fn read_pem(path: &std::path::Path) -> WxPayResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        WxPayError::Configuration(format!("Failed to read {}: {}", path.display(), e))
    })
}

impl std::fmt::Debug for WxPayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WxPayClient")
            .field("account", &self.account)
            .field("domain", &self.domain)
            .field("tls_transport", &self.tls_transport.is_some())
            .finish()
    }
}
