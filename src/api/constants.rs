//! API constants for the networking service REST API

/// User agent sent with every request
pub fn user_agent() -> String {
    format!("quark-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Standard headers for networking service requests
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Token header understood by the networking service
    pub const X_AUTH_TOKEN: &str = "X-Auth-Token";

    /// Per-request correlation id, echoed in logs
    pub const X_CORRELATION_ID: &str = "X-Correlation-Id";
}

/// Build the full URL of a collection or record path
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Build the path of a single record below a collection path
pub fn record_path(resource_path: &str, id: &str) -> String {
    format!("{}/{}", resource_path, urlencoding::encode(id))
}
