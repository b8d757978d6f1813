//! Notification handler
//!
//! Verifies gateway notifications and answers with the XML acknowledgement
//! the gateway expects.

use crate::application::notify::{notify_reply_fail, notify_reply_success};
use crate::application::Account;
use crate::domain::{ParamSet, ResponseOutcome, FIELD_NONCE_STR};
use crate::shared::logging::LoggingUtils;
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{error, warn};
use warp::Reply;

/// Handle a notification POST
pub async fn handle_notify(
    body: Bytes,
    account: Arc<Account>,
    sink: mpsc::Sender<ParamSet>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let outcome = account.verify_notification(&body);
    let nonce = match &outcome {
        ResponseOutcome::Valid(fields) => fields.get(FIELD_NONCE_STR).unwrap_or_default().to_string(),
        _ => String::new(),
    };
    LoggingUtils::log_outcome("notify", &nonce, &outcome);

    let reply = match outcome {
        ResponseOutcome::Valid(fields) => match sink.try_send(fields) {
            Ok(()) => notify_reply_success(),
            Err(TrySendError::Full(_)) => {
                warn!("Notification queue is full; asking the gateway to redeliver");
                notify_reply_fail("notification queue full")
            }
            Err(TrySendError::Closed(_)) => {
                error!("Notification consumer is gone; asking the gateway to redeliver");
                notify_reply_fail("notification consumer unavailable")
            }
        },
        ResponseOutcome::CommFailure(_) => notify_reply_fail("return_code is FAIL"),
        ResponseOutcome::MalformedProtocol(reason) => notify_reply_fail(&reason),
        ResponseOutcome::SignatureInvalid => notify_reply_fail("invalid sign"),
    };

    Ok(xml_reply(reply))
}

fn xml_reply(body: Bytes) -> impl Reply {
    warp::reply::with_header(body.to_vec(), "content-type", "text/xml")
}
