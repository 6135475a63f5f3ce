//! ConciergeService trait definition.
//!
//! The backend that answers guest messages and names tenants. Uses native
//! async fn in traits (RPITIT); implementations live in `concierge-infra`
//! (e.g., `HttpConciergeService`).

use concierge_types::error::ConciergeError;
use concierge_types::wire::{ChatRequest, ChatResponse, TenantInfo};

/// Port for the concierge backend.
pub trait ConciergeService: Send + Sync {
    /// Look up tenant metadata (`GET /tenant/{tenant_id}`).
    fn fetch_tenant(
        &self,
        tenant_id: &str,
    ) -> impl std::future::Future<Output = Result<TenantInfo, ConciergeError>> + Send;

    /// Submit one guest message and wait for the reply (`POST /chat`).
    fn send_chat(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatResponse, ConciergeError>> + Send;
}
