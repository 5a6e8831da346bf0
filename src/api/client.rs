use super::constants::{self, headers};
use super::executor::RequestExecutor;
use super::request::{ApiRequest, HttpMethod};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Networking service REST client authenticated with a pre-issued token
#[derive(Clone)]
pub struct NeutronClient {
    base_url: String,
    http_client: reqwest::Client,
    auth_token: String,
}

impl NeutronClient {
    pub fn new(base_url: String, auth_token: String) -> anyhow::Result<Self> {
        Self::with_timeouts(
            base_url,
            auth_token,
            Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    /// Create a client with explicit request and connection timeouts
    pub fn with_timeouts(
        base_url: String,
        auth_token: String,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(constants::user_agent())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(base_url, auth_token, http_client))
    }

    /// Create a client around a preconfigured HTTP client
    pub fn with_custom_client(base_url: String, auth_token: String, http_client: reqwest::Client) -> Self {
        Self {
            base_url,
            http_client,
            auth_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Decode a response, turning non-success statuses into errors carrying the server body
    async fn parse_response(&self, request: &ApiRequest, response: reqwest::Response) -> anyhow::Result<Option<Value>> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("{} failed with status {}: {}", request, status, error_text);
        }

        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body of {}", request))?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let json = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response of {}", request))?;
        Ok(Some(json))
    }
}

#[async_trait]
impl RequestExecutor for NeutronClient {
    async fn execute(&self, request: &ApiRequest) -> anyhow::Result<Option<Value>> {
        let url = constants::endpoint_url(&self.base_url, &request.path);
        let correlation_id = uuid::Uuid::new_v4().to_string();
        debug!("{} {} (correlation id {})", request.method, url, correlation_id);

        let builder = match request.method {
            HttpMethod::Get => self.http_client.get(&url),
            HttpMethod::Post => self.http_client.post(&url),
            HttpMethod::Delete => self.http_client.delete(&url),
        };

        let mut builder = builder
            .header(headers::X_AUTH_TOKEN, &self.auth_token)
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .header(headers::X_CORRELATION_ID, &correlation_id);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", headers::CONTENT_TYPE_JSON)
                .json(body);
        }

        let request_start = Instant::now();
        let response = builder
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to {}", request.method, url))?;
        debug!(
            "{} {} answered {} in {:.2}ms",
            request.method,
            url,
            response.status(),
            request_start.elapsed().as_secs_f64() * 1000.0
        );

        self.parse_response(request, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer a single HTTP request with `status` and `body`, yielding the raw request text
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 4096];

            loop {
                let read = socket.read(&mut chunk).await.unwrap();
                if read == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..read]);

                let text = String::from_utf8_lossy(&received).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if received.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = if status.starts_with("204") {
                format!("HTTP/1.1 {}\r\nConnection: close\r\n\r\n", status)
            } else {
                format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                )
            };
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&received).to_string()
        });

        (base_url, handle)
    }

    fn client(base_url: String) -> NeutronClient {
        let http_client = reqwest::Client::builder().no_proxy().build().unwrap();
        NeutronClient::with_custom_client(base_url, "secret".to_string(), http_client)
    }

    #[tokio::test]
    async fn error_status_carries_method_path_and_body() {
        let body = r#"{"NeutronError": "Invalid input for cidr"}"#;
        let (base_url, server) = serve_once("400 Bad Request", body).await;

        let err = client(base_url)
            .execute(&ApiRequest::post("/routes", json!({"route": {"cidr": "nope"}})))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("POST /routes failed with status 400 Bad Request: {}", body)
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn no_content_is_none() {
        let (base_url, server) = serve_once("204 No Content", "").await;

        let response = client(base_url)
            .execute(&ApiRequest::delete("/ip_policies/abc123"))
            .await
            .unwrap();

        assert_eq!(response, None);
        let received = server.await.unwrap();
        assert!(received.starts_with("DELETE /ip_policies/abc123 HTTP/1.1"));
    }

    #[tokio::test]
    async fn created_with_empty_body_is_none() {
        let (base_url, server) = serve_once("201 Created", "").await;

        let response = client(base_url)
            .execute(&ApiRequest::post("/routes", json!({"route": {}})))
            .await
            .unwrap();

        assert_eq!(response, None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn sends_token_query_and_body() {
        let (base_url, server) = serve_once("200 OK", r#"{"routes": [{"id": "r1"}]}"#).await;

        let request = ApiRequest::get("/routes").with_query([
            ("limit".to_string(), "5".to_string()),
            ("marker".to_string(), "r0".to_string()),
        ]);
        let response = client(base_url).execute(&request).await.unwrap();

        assert_eq!(response, Some(json!({"routes": [{"id": "r1"}]})));

        let received = server.await.unwrap().to_lowercase();
        assert!(received.starts_with("get /routes?limit=5&marker=r0 http/1.1"));
        assert!(received.contains("x-auth-token: secret"));
        assert!(received.contains("x-correlation-id: "));
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let (base_url, server) = serve_once("201 Created", r#"{"route": {"id": "r1"}}"#).await;

        client(base_url)
            .execute(&ApiRequest::post("/routes", json!({"route": {"cidr": "10.0.0.0/24"}})))
            .await
            .unwrap();

        let received = server.await.unwrap();
        assert!(received.to_lowercase().contains("content-type: application/json"));
        assert!(received.ends_with(r#"{"route":{"cidr":"10.0.0.0/24"}}"#));
    }
}
