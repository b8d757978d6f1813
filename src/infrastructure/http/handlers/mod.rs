//! HTTP route handlers module

pub mod notify;

pub use notify::handle_notify;
