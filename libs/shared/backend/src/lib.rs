use reqwest::{
    Client, Method,
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Transport and HTTP-level errors from the upstream appointment backend.
/// Cells map these into their own error enums; an application-level
/// `success:false` envelope is interpreted by the cells themselves.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Backend error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Thin client for the REST backend the gateway fronts. Bearer tokens are
/// forwarded opaquely; the backend owns authentication.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            // No per-request timeout: a hung verify call stays hung, which
            // matches the documented behavior of the reconciliation flow.
            client: Client::new(),
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self, auth_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(auth_token));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Backend error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => BackendError::Auth(error_text),
                404 => BackendError::NotFound(error_text),
                code => BackendError::Upstream {
                    status: code,
                    body: error_text,
                },
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> BackendClient {
        BackendClient::new(&AppConfig {
            backend_url: base_url.to_string(),
            notification_poll_secs: 30,
            notification_poll_max_backoff_secs: 300,
        })
    }

    #[tokio::test]
    async fn forwards_bearer_token_and_decodes_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(header("Authorization", "Bearer token-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&mock_server)
            .await;

        let value: Value = client(&mock_server.uri())
            .request(Method::GET, "/api/ping", Some("token-1"), None)
            .await
            .unwrap();

        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn maps_status_codes_to_error_variants() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/unauthorized"))
            .respond_with(ResponseTemplate::new(401).set_body_string("no token"))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server.uri());

        let err = client
            .request::<Value>(Method::GET, "/unauthorized", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Auth(_)));

        let err = client
            .request::<Value>(Method::GET, "/missing", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound(_)));

        let err = client
            .request::<Value>(Method::GET, "/broken", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_normalized() {
        let client = client("http://localhost:4000/");
        assert_eq!(client.base_url(), "http://localhost:4000");
    }
}
