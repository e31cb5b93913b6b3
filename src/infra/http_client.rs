//! Outbound HTTP clients with bounded connect and request time.
//!
//! Code that talks to another service over HTTP builds its client here rather
//! than calling `reqwest::Client::new()`, which never times out.

use reqwest::Client;
use std::time::Duration;

/// TCP handshake plus TLS.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whole request, including reading the response body.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn try_build_client() -> Result<Client, reqwest::Error> {
    try_build_client_with(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
}

pub fn try_build_client_with(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
}
