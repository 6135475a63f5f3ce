//! JSON bodies exchanged with the concierge backend.
//!
//! `POST /chat` takes a [`ChatRequest`] and answers with [`ChatResponse`];
//! `GET /tenant/{id}` answers with [`TenantInfo`]. Error answers carry an
//! [`ErrorBody`].

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Omitted entirely in the single-tenant deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub guest_name: String,
    pub guest_message: String,
}

/// Successful answer of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Successful answer of `GET /tenant/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantInfo {
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub tenant_name: String,
}

/// Error envelope the backend uses for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
