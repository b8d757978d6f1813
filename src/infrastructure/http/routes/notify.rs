//! Notification routes

use std::sync::Arc;
use tokio::sync::mpsc;
use warp::Filter;

use crate::application::Account;
use crate::config::app_config::ServerConfig;
use crate::domain::ParamSet;
use crate::infrastructure::http::handlers::handle_notify;

pub struct NotifyRoutes;

impl NotifyRoutes {
    /// `POST /{notify_path}` plus `GET /health`.
    pub fn create_routes(
        config: &ServerConfig,
        account: Arc<Account>,
        sink: mpsc::Sender<ParamSet>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let notify = warp::path(config.notify_path.clone())
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(config.max_request_size as u64))
            .and(warp::body::bytes())
            .and(Self::with_account(account))
            .and(Self::with_sink(sink))
            .and_then(handle_notify);

        let health = warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| "OK");

        notify.or(health)
    }

    fn with_account(
        account: Arc<Account>,
    ) -> impl Filter<Extract = (Arc<Account>,), Error = std::convert::Infallible> + Clone {
        warp::any().map(move || account.clone())
    }

    fn with_sink(
        sink: mpsc::Sender<ParamSet>,
    ) -> impl Filter<Extract = (mpsc::Sender<ParamSet>,), Error = std::convert::Infallible> + Clone
    {
        warp::any().map(move || sink.clone())
    }
}
