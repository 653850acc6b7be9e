//! Shared HTTP client construction.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::HeaderMap;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("issue2misskey/", env!("CARGO_PKG_VERSION"));

/// Builds a client with the crate user agent, a request timeout and `headers`.
///
/// # Errors
/// Returns error if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration, headers: HeaderMap) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()
}

/// Describes a transport failure for error messages.
#[must_use]
pub fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("failed to connect: {error}")
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = build_client(Duration::from_secs(5), HeaderMap::new());
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("issue2misskey/"));
    }
}
