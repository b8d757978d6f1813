//! HTTP infrastructure module
//!
//! This module contains the notification listener: server, routes and handlers.

pub mod handlers;
pub mod routes;
pub mod server;

pub use handlers::handle_notify;
pub use routes::NotifyRoutes;
pub use server::{notification_channel, NotifyServer};
