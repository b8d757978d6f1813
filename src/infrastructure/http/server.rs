//! HTTP server for payment notifications
//!
//! The gateway posts asynchronous payment results to the merchant's notify URL.
//! This listener verifies them and hands valid notifications to a channel.

use crate::{
    application::Account,
    config::AppConfig,
    domain::ParamSet,
    infrastructure::http::routes::NotifyRoutes,
    shared::error::{WxPayError, WxPayResult},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use warp::{Filter, Reply};

/// Queue between the listener and the notification consumer.
///
/// A full queue makes the listener answer FAIL, and the gateway redelivers later.
pub fn notification_channel(
    depth: usize,
) -> (mpsc::Sender<ParamSet>, mpsc::Receiver<ParamSet>) {
    mpsc::channel(depth)
}

/// Notification listener
pub struct NotifyServer {
    config: AppConfig,
    account: Arc<Account>,
    sink: mpsc::Sender<ParamSet>,
}

impl NotifyServer {
    /// Create a listener that forwards verified notifications to `sink`
    pub fn new(config: AppConfig, account: Arc<Account>, sink: mpsc::Sender<ParamSet>) -> Self {
        Self {
            config,
            account,
            sink,
        }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[instrument(skip(self))]
    pub async fn run(self) -> WxPayResult<()> {
        let addr: std::net::SocketAddr = self
            .config
            .server_address()
            .parse()
            .map_err(|e| WxPayError::Configuration(format!("Invalid server address: {}", e)))?;

        info!(
            "Listening for notifications on {} at /{}",
            addr, self.config.server.notify_path
        );

        let routes = self.routes();
        warp::serve(routes).run(addr).await;

        Ok(())
    }

    pub fn routes(&self) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
        NotifyRoutes::create_routes(&self.config.server, self.account.clone(), self.sink.clone())
    }
}
