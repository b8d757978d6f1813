//! HTTP routes module
//!
//! This module contains the HTTP route configuration.

pub mod notify;

pub use notify::NotifyRoutes;
