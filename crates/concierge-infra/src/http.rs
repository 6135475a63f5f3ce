//! HttpConciergeService -- [`ConciergeService`] over the backend's REST API.
//!
//! `GET {base_url}/tenant/{tenant_id}` for tenant metadata and
//! `POST {base_url}/chat` for guest messages. Transport failures are sorted
//! into the [`ConciergeError`] taxonomy here so the session never sees a
//! `reqwest::Error`.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde_json::Value;

use concierge_core::service::ConciergeService;
use concierge_types::config::ClientConfig;
use concierge_types::error::{ConciergeError, ConfigError};
use concierge_types::wire::{ChatRequest, ChatResponse, ErrorBody, TenantInfo};

/// Concierge backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConciergeService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpConciergeService {
    /// Create a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ConciergeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConciergeError::Connectivity {
                reason: format!("base url '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Sort a transport failure by how far the request got.
fn classify(err: reqwest::Error) -> ConciergeError {
    if err.is_builder() {
        ConciergeError::Connectivity {
            reason: err.to_string(),
        }
    } else {
        ConciergeError::NoResponse {
            reason: err.to_string(),
        }
    }
}

/// Turn a non-2xx answer into [`ConciergeError::Server`], keeping the
/// backend's `error` field for the logs.
async fn server_error(status: StatusCode, response: reqwest::Response) -> ConciergeError {
    let detail = response
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
        .map(|body| body.error);
    ConciergeError::Server {
        status: status.as_u16(),
        detail,
    }
}

/// Decode a 2xx body, reporting the backend's `error` field if that is all it holds.
fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ConciergeError> {
    serde_json::from_slice::<T>(body).map_err(|e| {
        let reason = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => match map.get("error").and_then(Value::as_str) {
                Some(error) => format!("backend error: {error}"),
                None => e.to_string(),
            },
            _ => e.to_string(),
        };
        ConciergeError::MalformedResponse { reason }
    })
}

impl ConciergeService for HttpConciergeService {
    async fn fetch_tenant(&self, tenant_id: &str) -> Result<TenantInfo, ConciergeError> {
        let url = self.endpoint(&["tenant", tenant_id])?;
        tracing::debug!(url = %url, "GET tenant");

        let response = self.client.get(url).send().await.map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(server_error(status, response).await);
        }

        let body = response.bytes().await.map_err(classify)?;
        decode(&body)
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ConciergeError> {
        let url = self.endpoint(&["chat"])?;
        tracing::debug!(url = %url, tenant_id = ?request.tenant_id, "POST chat");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(server_error(status, response).await);
        }

        let body = response.bytes().await.map_err(classify)?;
        decode(&body)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use concierge_core::session::{ChatSession, SendOutcome, SessionOptions};

    use super::*;

    type Seen = Arc<Mutex<Vec<Value>>>;

    /// Mimics the multi-tenant backend: `acme` exists, chat needs a tenant id,
    /// the message "boom" triggers a 500 and "slow" stalls.
    fn backend(seen: Seen) -> Router {
        Router::new()
            .route(
                "/tenant/{id}",
                get(|Path(id): Path<String>| async move {
                    match id.as_str() {
                        "acme" => (
                            AxumStatus::OK,
                            Json(json!({"tenant_id": "acme", "tenant_name": "Acme Resort"})),
                        ),
                        "grand hotel" => (
                            AxumStatus::OK,
                            Json(json!({"tenant_id": "grand hotel", "tenant_name": "The Grand"})),
                        ),
                        _ => (
                            AxumStatus::NOT_FOUND,
                            Json(json!({"error": "Tenant not found"})),
                        ),
                    }
                }),
            )
            .route(
                "/chat",
                post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body.clone());
                    if body.get("tenant_id").is_none() {
                        return (AxumStatus::OK, Json(json!({"error": "Access denied"})));
                    }
                    match body["guest_message"].as_str() {
                        Some("boom") => (
                            AxumStatus::INTERNAL_SERVER_ERROR,
                            Json(json!({"error": "internal"})),
                        ),
                        Some("slow") => {
                            tokio::time::sleep(Duration::from_secs(5)).await;
                            (AxumStatus::OK, Json(json!({"response": "too late"})))
                        }
                        Some("What time is checkout?") => (
                            AxumStatus::OK,
                            Json(json!({"response": "Checkout is at 11am."})),
                        ),
                        _ => (AxumStatus::OK, Json(json!({"response": "Noted."}))),
                    }
                }),
            )
            .with_state(seen)
    }

    async fn spawn_backend() -> (SocketAddr, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = backend(seen.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (addr, seen)
    }

    fn client(addr: SocketAddr, timeout: Duration) -> HttpConciergeService {
        HttpConciergeService::new(&format!("http://{addr}"), timeout).unwrap()
    }

    fn chat(tenant_id: Option<&str>, message: &str) -> ChatRequest {
        ChatRequest {
            tenant_id: tenant_id.map(str::to_string),
            guest_name: "Okafor".to_string(),
            guest_message: message.to_string(),
        }
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            HttpConciergeService::new("not a url", Duration::from_secs(1)),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpConciergeService::new("mailto:desk@example.com", Duration::from_secs(1)),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let svc =
            HttpConciergeService::new("https://example.com/api/", Duration::from_secs(1)).unwrap();
        let url = svc.endpoint(&["tenant", "grand hotel/2"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/tenant/grand%20hotel%2F2");
    }

    #[tokio::test]
    async fn fetch_tenant_success() {
        let (addr, _) = spawn_backend().await;
        let info = client(addr, Duration::from_secs(5))
            .fetch_tenant("acme")
            .await
            .unwrap();
        assert_eq!(info.tenant_name, "Acme Resort");
    }

    #[tokio::test]
    async fn fetch_tenant_encodes_id() {
        let (addr, _) = spawn_backend().await;
        let info = client(addr, Duration::from_secs(5))
            .fetch_tenant("grand hotel")
            .await
            .unwrap();
        assert_eq!(info.tenant_name, "The Grand");
    }

    #[tokio::test]
    async fn fetch_unknown_tenant_is_server_error() {
        let (addr, _) = spawn_backend().await;
        let err = client(addr, Duration::from_secs(5))
            .fetch_tenant("nowhere")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ConciergeError::Server {
                status: 404,
                detail: Some("Tenant not found".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn send_chat_posts_expected_body() {
        let (addr, seen) = spawn_backend().await;
        let reply = client(addr, Duration::from_secs(5))
            .send_chat(&chat(Some("acme"), "What time is checkout?"))
            .await
            .unwrap();

        assert_eq!(reply.response, "Checkout is at 11am.");
        let bodies = seen.lock().unwrap().clone();
        assert_eq!(
            bodies,
            vec![json!({
                "tenant_id": "acme",
                "guest_name": "Okafor",
                "guest_message": "What time is checkout?"
            })]
        );
    }

    #[tokio::test]
    async fn send_chat_500_is_server_error() {
        let (addr, _) = spawn_backend().await;
        let err = client(addr, Duration::from_secs(5))
            .send_chat(&chat(Some("acme"), "boom"))
            .await
            .unwrap_err();
        assert_eq!(err.bubble_text(), "Server error: 500");
    }

    #[tokio::test]
    async fn send_chat_error_body_with_200_is_malformed() {
        let (addr, seen) = spawn_backend().await;
        let err = client(addr, Duration::from_secs(5))
            .send_chat(&chat(None, "hello"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ConciergeError::MalformedResponse {
                reason: "backend error: Access denied".to_string(),
            }
        );
        // Single-tenant requests carry no tenant_id key at all.
        assert!(seen.lock().unwrap()[0].get("tenant_id").is_none());
    }

    #[tokio::test]
    async fn send_chat_timeout_is_no_response() {
        let (addr, _) = spawn_backend().await;
        let err = client(addr, Duration::from_millis(200))
            .send_chat(&chat(Some("acme"), "slow"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConciergeError::NoResponse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn send_chat_refused_connection_is_no_response() {
        // Bind then drop to get a port nobody listens on.
        let addr = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let err = client(addr, Duration::from_secs(5))
            .send_chat(&chat(Some("acme"), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConciergeError::NoResponse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn chat_session_over_http() {
        let (addr, _) = spawn_backend().await;
        let session = ChatSession::new(
            client(addr, Duration::from_secs(5)),
            SessionOptions {
                tenant_id: Some("acme".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(session.refresh_tenant_name().await, "Acme Resort");
        session.authenticate("412", "Okafor").unwrap();
        let outcome = session.send_message("What time is checkout?").await.unwrap();
        assert_eq!(outcome, SendOutcome::Replied { index: 2 });

        let outcome = session.send_message("boom").await.unwrap();
        assert!(matches!(outcome, SendOutcome::Failed { index: 4, .. }));

        let snapshot = session.snapshot();
        let texts: Vec<_> = snapshot
            .state
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![
                "Hello! What can I help you with today?",
                "What time is checkout?",
                "Checkout is at 11am.",
                "boom",
                "Server error: 500",
            ]
        );
    }

    #[tokio::test]
    async fn unknown_tenant_over_http_falls_back() {
        let (addr, _) = spawn_backend().await;
        let session = ChatSession::new(client(addr, Duration::from_secs(5)), SessionOptions::default());

        assert_eq!(session.fetch_tenant_display_name("nowhere").await, "Hotel");
        session.authenticate("9", "Ruiz").unwrap();
        assert!(session.snapshot().state.is_active());
    }
}
