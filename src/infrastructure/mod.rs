//! Infrastructure layer - External concerns
//!
//! This module contains the XML wire codec, the HTTPS transport to the
//! gateway and the HTTP listener for payment notifications.

pub mod http;
pub mod transport;
pub mod xml;

pub use transport::{gateway_url, ClientCertificate, HttpTransport, Transport, TransportOptions};
