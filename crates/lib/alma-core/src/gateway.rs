//! Outbound HTTP gateway for the Alma schema API.
//!
//! One GET per call, no retries. The gateway classifies every outcome into
//! parsed JSON, an API-reported failure, or a transport failure, so callers
//! never deal with raw HTTP machinery.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use reqwest::Url;
use serde_json::Value;
use tracing::debug;

/// Base URL used when no configuration is provided.
pub const DEFAULT_BASE_URL: &str = "http://localhost";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint paths on the schema API.
pub mod paths {
    pub const DATABASE_CONTEXT: &str = "/database-context";
    pub const DATABASE_COLLECTIONS: &str = "/database-collections";
    pub const DATABASE_COLLECTION_SCHEMA: &str = "/database-collection-schema";
    pub const DATABASE_COLLECTION_SEARCH: &str = "/database-collection-search";
}

/// Configuration for the schema API gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum GatewayError {
    /// The API answered with a non-success status, optionally carrying a
    /// `message` field in a JSON body.
    Api { status: u16, message: Option<String> },
    /// The API could not be reached or its body could not be decoded.
    Transport(String),
}

impl GatewayError {
    /// Failure detail suitable for user-facing tool text.
    ///
    /// API failures surface the API's own message, falling back to a generic
    /// label when the body carried none.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Api { message, .. } => message.as_deref().unwrap_or("Unknown error"),
            Self::Transport(detail) => detail,
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { status, message } => match message {
                Some(message) => write!(f, "schema API error (status {status}): {message}"),
                None => write!(f, "schema API error (status {status})"),
            },
            Self::Transport(detail) => write!(f, "{detail}"),
        }
    }
}

impl Error for GatewayError {}

/// HTTP client for the schema API.
///
/// Holds the immutable base URL and a pooled `reqwest` client; safe to share
/// behind `Arc` across concurrent tool invocations.
#[derive(Debug, Clone)]
pub struct SchemaGateway {
    client: reqwest::Client,
    base_url: String,
}

impl SchemaGateway {
    /// Builds a gateway from configuration.
    ///
    /// Trailing slashes on the base URL are trimmed so endpoint paths join
    /// cleanly.
    ///
    /// # Errors
    /// Returns `GatewayError::Transport` if the base URL does not parse or
    /// the HTTP client cannot be constructed.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|err| GatewayError::Transport(format!("invalid base URL {base_url:?}: {err}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| GatewayError::Transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { client, base_url })
    }

    /// Issues a single GET against `{base}{path}` with the given query
    /// parameters and parses the response body as JSON.
    ///
    /// Query values are URL-encoded; parameter order is preserved.
    ///
    /// # Errors
    /// Returns `GatewayError::Api` for non-success statuses and
    /// `GatewayError::Transport` for network, timeout, or decode failures.
    pub async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, GatewayError> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url)).map_err(|err| {
            GatewayError::Transport(format!("invalid request URL for {path}: {err}"))
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        debug!(%url, "schema API request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(format!("failed to reach schema API: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned));
            debug!(status = status.as_u16(), "schema API error response");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|err| {
            GatewayError::Transport(format!("failed to decode schema API response: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn gateway_for(base_url: impl Into<String>) -> SchemaGateway {
        SchemaGateway::new(GatewayConfig::new(base_url)).expect("gateway should build")
    }

    #[tokio::test]
    async fn fetch_returns_parsed_json_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(paths::DATABASE_CONTEXT))
            .and(query_param("database", "shop"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tenant": "shop"})))
            .mount(&server)
            .await;

        let value = gateway_for(server.uri())
            .fetch(paths::DATABASE_CONTEXT, &[("database", "shop")])
            .await
            .expect("fetch should succeed");
        assert_eq!(value, json!({"tenant": "shop"}));
    }

    #[tokio::test]
    async fn fetch_url_encodes_query_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(paths::DATABASE_COLLECTION_SEARCH))
            .and(query_param("database", "shop"))
            .and(query_param("search", "user logs & more"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        gateway_for(server.uri())
            .fetch(
                paths::DATABASE_COLLECTION_SEARCH,
                &[("database", "shop"), ("search", "user logs & more")],
            )
            .await
            .expect("encoded query should reach the matching mock");
    }

    #[tokio::test]
    async fn trailing_slash_on_base_url_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(paths::DATABASE_COLLECTIONS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        gateway_for(format!("{}/", server.uri()))
            .fetch(paths::DATABASE_COLLECTIONS, &[("database", "shop")])
            .await
            .expect("normalized base URL should still match the endpoint path");
    }

    #[tokio::test]
    async fn non_success_status_with_message_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(paths::DATABASE_CONTEXT))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "database not found"})),
            )
            .mount(&server)
            .await;

        let err = gateway_for(server.uri())
            .fetch(paths::DATABASE_CONTEXT, &[("database", "missing")])
            .await
            .expect_err("404 should not be a success");
        match err {
            GatewayError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("database not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_leaves_message_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(paths::DATABASE_CONTEXT))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = gateway_for(server.uri())
            .fetch(paths::DATABASE_CONTEXT, &[("database", "shop")])
            .await
            .expect_err("500 should not be a success");
        match &err {
            GatewayError::Api { status, message } => {
                assert_eq!(*status, 500);
                assert_eq!(*message, None);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.detail(), "Unknown error");
    }

    #[tokio::test]
    async fn invalid_success_body_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(paths::DATABASE_COLLECTION_SCHEMA))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = gateway_for(server.uri())
            .fetch(
                paths::DATABASE_COLLECTION_SCHEMA,
                &[("database", "shop"), ("collection", "users")],
            )
            .await
            .expect_err("non-JSON success body should fail to decode");
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let server = MockServer::builder().start().await;
        let uri = server.uri();
        drop(server);

        let err = gateway_for(uri)
            .fetch(paths::DATABASE_CONTEXT, &[("database", "shop")])
            .await
            .expect_err("dropped server should refuse connections");
        assert!(matches!(err, GatewayError::Transport(_)));
        assert!(!err.detail().is_empty());
    }

    #[tokio::test]
    async fn slow_response_trips_the_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(paths::DATABASE_CONTEXT))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let gateway = SchemaGateway::new(
            GatewayConfig::new(server.uri()).with_timeout(Some(Duration::from_millis(50))),
        )
        .expect("gateway should build");
        let err = gateway
            .fetch(paths::DATABASE_CONTEXT, &[("database", "shop")])
            .await
            .expect_err("delayed response should exceed the timeout");
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[test]
    fn invalid_base_url_is_rejected_at_construction() {
        let err = SchemaGateway::new(GatewayConfig::new("not a url"))
            .expect_err("construction should fail");
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
