//! Unit tests for WxPay gateway components
//!
//! This module provides unit tests covering:
//! - Signing determinism and field exclusion
//! - The wire codec against the signature
//! - The staged request pipeline
//! - Response classification

use crate::{
    application::{Account, RequestBuilder, ResponseValidator},
    domain::{nonce, sign, verify, ParamSet, ResponseOutcome, SignType, SignatureContext},
    infrastructure::xml,
    shared::error::WxPayError,
    tests::common::{assertions, fixtures},
};

/// Domain layer unit tests
pub mod domain {
    use super::*;

    #[test]
    fn test_signature_is_independent_of_insertion_order() {
        let forward = ParamSet::new()
            .with("a", "1")
            .with("b", "2")
            .with("c", "3");
        let backward = ParamSet::new()
            .with("c", "3")
            .with("b", "2")
            .with("a", "1");
        for sign_type in [SignType::Md5, SignType::HmacSha256] {
            assert_eq!(
                sign(&forward, fixtures::API_SECRET, sign_type),
                sign(&backward, fixtures::API_SECRET, sign_type)
            );
        }
    }

    #[test]
    fn test_empty_values_do_not_change_the_signature() {
        let base = fixtures::order_query_params();
        let padded = base.clone().with("attach", "").with("detail", "");
        assert_eq!(
            sign(&base, fixtures::API_SECRET, SignType::Md5),
            sign(&padded, fixtures::API_SECRET, SignType::Md5)
        );
    }

    #[test]
    fn test_existing_sign_field_does_not_change_the_signature() {
        let base = fixtures::order_query_params();
        let stale = base.clone().with("sign", "STALE");
        assert_eq!(
            sign(&base, fixtures::API_SECRET, SignType::HmacSha256),
            sign(&stale, fixtures::API_SECRET, SignType::HmacSha256)
        );
    }

    #[test]
    fn test_signature_survives_the_wire() {
        let account = Account::new(fixtures::APP_ID, fixtures::MCH_ID, fixtures::API_SECRET);
        let sealed = RequestBuilder::new(&account, fixtures::paid_order())
            .fill()
            .unwrap()
            .sign()
            .seal();

        let decoded = xml::decode(sealed.body()).unwrap();
        assert!(verify(&decoded, fixtures::API_SECRET, SignType::Md5));
    }

    #[test]
    fn test_nonces_differ() {
        let first = nonce::generate(nonce::DEFAULT_NONCE_LENGTH);
        let second = nonce::generate(nonce::DEFAULT_NONCE_LENGTH);
        assert_ne!(first, second);
        assert!(first.bytes().all(|b| nonce::NONCE_ALPHABET.contains(&b)));
    }
}

/// Application layer unit tests
pub mod application {
    use super::*;

    fn account() -> Account {
        Account::new(fixtures::APP_ID, fixtures::MCH_ID, fixtures::API_SECRET)
    }

    #[test]
    fn test_fill_respects_caller_values() {
        let params = ParamSet::new()
            .with("appid", "wxother")
            .with("nonce_str", "fixednonce");
        let account = account();
        let filled = RequestBuilder::new(&account, params).fill().unwrap();
        assert_eq!(filled.params().get("appid"), Some("wxother"));
        assert_eq!(filled.params().get("nonce_str"), Some("fixednonce"));
        assert_eq!(filled.params().get("mch_id"), Some(fixtures::MCH_ID));
    }

    #[test]
    fn test_sealed_request_is_a_valid_envelope() {
        let account = account().with_sign_type(SignType::HmacSha256);
        let sealed = RequestBuilder::new(&account, fixtures::order_query_params())
            .fill()
            .unwrap()
            .sign()
            .seal();
        let params = xml::decode(sealed.body()).unwrap();
        assertions::assert_signed_envelope(&params, SignType::HmacSha256);
        assert_eq!(params.get("nonce_str"), Some(sealed.nonce()));
    }

    #[test]
    fn test_unknown_sign_type_is_rejected_before_signing() {
        let account = account();
        let params = fixtures::order_query_params().with("sign_type", "SHA1");
        let err = RequestBuilder::new(&account, params).fill().unwrap_err();
        assert!(matches!(err, WxPayError::Validation(_)));
    }

    #[test]
    fn test_validator_uses_the_supplied_sign_type() {
        let body = fixtures::signed_success(fixtures::paid_order(), SignType::HmacSha256);

        let hmac = SignatureContext::new(fixtures::API_SECRET, SignType::HmacSha256);
        assert!(ResponseValidator::new(&hmac).validate(&body).is_valid());

        let md5 = SignatureContext::new(fixtures::API_SECRET, SignType::Md5);
        assert_eq!(
            ResponseValidator::new(&md5).validate(&body),
            ResponseOutcome::SignatureInvalid
        );
    }

    #[test]
    fn test_comm_failure_needs_no_signature() {
        let ctx = SignatureContext::new(fixtures::API_SECRET, SignType::Md5);
        let outcome = ResponseValidator::new(&ctx).validate(&fixtures::comm_failure("签名错误"));
        assert_eq!(outcome, ResponseOutcome::CommFailure("签名错误".to_string()));
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.return_msg(), Some("签名错误"));
    }

    #[test]
    fn test_pipeline_runs_on_a_blocking_executor() {
        let transport = crate::tests::common::MockTransport::new();
        transport.push_reply(fixtures::signed_success(fixtures::paid_order(), SignType::Md5));
        let client = crate::tests::common::mock_client(transport.clone(), None);

        let fields = tokio_test::block_on(client.order_query(fixtures::order_query_params()))
            .unwrap();
        assert_eq!(fields.get("trade_state"), Some("SUCCESS"));
        assert_eq!(transport.call_count(), 1);
    }
}
