// File: src/client/core.rs
use crate::client::error::ApiError;
use crate::client::middleware::{BearerAuthLayer, BearerAuthService, UserAgentLayer, UserAgentService};
use crate::session::SessionStore;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::{ServiceBuilder, ServiceExt};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const TASKS_TODAY_PATH: &str = "/api/tasks/today";
pub const GOAL_STATS_PATH: &str = "/api/goals/stats";
pub const TASK_STATISTICS_PATH: &str = "/api/tasks/statistics";

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;
type ApiService = UserAgentService<BearerAuthService<HttpsClient>>;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

fn message_field(payload: &Value) -> Option<String> {
    payload
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

impl LoginResponse {
    fn from_payload(payload: &Value) -> Result<Self, ApiError> {
        let token = payload
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::InvalidData("Missing token in login response".to_string()))?;
        Ok(Self {
            token: token.to_string(),
            message: message_field(payload),
        })
    }
}

/// JSON client for the PlanCraft API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    service: ApiService,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        session: Arc<dyn SessionStore>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let uri: Uri = base_url
            .parse()
            .map_err(|_| ApiError::InvalidUrl(base_url.clone()))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        for err in &result.errors {
            log::debug!("Skipping system certificate: {}", err);
        }
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            // Plain http endpoints still work; https ones will fail the handshake.
            log::warn!("No valid system certificates found.");
        }
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http_client: HttpsClient = Client::builder(TokioExecutor::new()).build(https_connector);
        let service = ServiceBuilder::new()
            .layer(UserAgentLayer::new(format!(
                "plancraft/{}",
                env!("CARGO_PKG_VERSION")
            )))
            .layer(BearerAuthLayer::new(session))
            .service(http_client);

        Ok(Self {
            base_url,
            service,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- AUTH ---

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(req).map_err(|e| ApiError::InvalidData(e.to_string()))?;
        let payload = self.send(Method::POST, LOGIN_PATH, Some(&body)).await?;
        LoginResponse::from_payload(&payload)
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        let body = serde_json::to_value(req).map_err(|e| ApiError::InvalidData(e.to_string()))?;
        let payload = self.send(Method::POST, REGISTER_PATH, Some(&body)).await?;
        Ok(RegisterResponse {
            message: message_field(&payload),
        })
    }

    // --- STATISTICS ---
    // These return the raw decoded payload; callers validate the shape.

    pub async fn tasks_today(&self) -> Result<Value, ApiError> {
        self.send(Method::GET, TASKS_TODAY_PATH, None).await
    }

    pub async fn goal_stats(&self) -> Result<Value, ApiError> {
        self.send(Method::GET, GOAL_STATS_PATH, None).await
    }

    pub async fn task_statistics(&self) -> Result<Value, ApiError> {
        self.send(Method::GET, TASK_STATISTICS_PATH, None).await
    }

    // --- TRANSPORT ---

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let payload = match body {
            Some(b) => serde_json::to_string(b).map_err(|e| ApiError::InvalidData(e.to_string()))?,
            None => String::new(),
        };

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(&url)
            .header(ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let req = builder
            .body(payload)
            .map_err(|_| ApiError::InvalidUrl(url.clone()))?;

        log::debug!("{} {}", method, url);
        let service = self.service.clone();
        let exchange = async move {
            let response = service
                .oneshot(req)
                .await
                .map_err(|e| ApiError::Transport(describe_error(&e)))?;
            let status = response.status();
            let bytes = collect_body(response.into_body()).await?;
            Ok::<(StatusCode, Vec<u8>), ApiError>((status, bytes))
        };

        let (status, bytes) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| {
                ApiError::Transport(format!(
                    "timeout of {}ms exceeded",
                    self.timeout.as_millis()
                ))
            })??;

        log::debug!("{} {} -> {}", method, url, status);
        if !status.is_success() {
            return Err(ApiError::from_error_body(status, &bytes));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

/// Flattens an error and its sources into one line ("client error (Connect): ...").
fn describe_error(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.contains(&text) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

async fn collect_body(body: hyper::body::Incoming) -> Result<Vec<u8>, ApiError> {
    let collected = body
        .collect()
        .await
        .map_err(|e| ApiError::Transport(describe_error(&e)))?;
    Ok(collected.to_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    #[test]
    fn test_rejects_invalid_base_url() {
        let session = Arc::new(MemorySessionStore::new());
        let err = ApiClient::new("not a url", session.clone(), Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        let err = ApiClient::new("/relative/only", session, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_login_response_requires_token() {
        let ok = LoginResponse::from_payload(&serde_json::json!({"token": "t", "message": "Hi"})).unwrap();
        assert_eq!(ok.token, "t");
        assert_eq!(ok.message.as_deref(), Some("Hi"));

        let missing = LoginResponse::from_payload(&serde_json::json!({"message": "Hi"}));
        assert!(matches!(missing, Err(ApiError::InvalidData(_))));
    }
}
