//! `ChatSession` -- sequences state transitions around concierge calls.
//!
//! The session state sits behind a mutex that is only ever held for the
//! synchronous part of an operation, never across an `.await`. That makes
//! the read-and-set of `pending` a single step: two overlapping sends cannot
//! both see `pending == false`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use concierge_types::config::ClientConfig;
use concierge_types::error::{ConciergeError, SessionError};
use concierge_types::event::SessionEvent;
use concierge_types::session::{
    SessionSnapshot, SessionState, TenantContext, DEFAULT_GREETING, DEFAULT_TENANT_NAME,
};
use concierge_types::wire::ChatRequest;

use crate::event::EventBus;
use crate::service::ConciergeService;

use super::transition;

/// Construction parameters for a [`ChatSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub tenant_id: Option<String>,
    pub greeting: String,
    pub fallback_tenant_name: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tenant_id: None,
            greeting: DEFAULT_GREETING.to_string(),
            fallback_tenant_name: DEFAULT_TENANT_NAME.to_string(),
        }
    }
}

impl From<&ClientConfig> for SessionOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            tenant_id: config.tenant_id.clone(),
            greeting: config.greeting.clone(),
            fallback_tenant_name: config.fallback_tenant_name.clone(),
        }
    }
}

/// Result of an accepted send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The backend answered; its reply sits at `index`.
    Replied { index: usize },
    /// The request failed; the error notice sits at `index`.
    Failed { index: usize, error: ConciergeError },
}

impl SendOutcome {
    pub fn index(&self) -> usize {
        match self {
            SendOutcome::Replied { index } | SendOutcome::Failed { index, .. } => *index,
        }
    }
}

struct Inner {
    state: SessionState,
    tenant: TenantContext,
    /// Tenant id a lookup was last started for.
    looked_up: Option<String>,
}

/// One guest's conversation with the concierge.
///
/// Every change is published as a [`SessionEvent`]; subscribe with
/// [`ChatSession::subscribe`] to render it.
pub struct ChatSession<S> {
    id: Uuid,
    service: S,
    greeting: String,
    fallback_tenant_name: String,
    inner: Mutex<Inner>,
    events: EventBus,
}

impl<S: ConciergeService> ChatSession<S> {
    pub fn new(service: S, options: SessionOptions) -> Self {
        let tenant = TenantContext::new(options.tenant_id, options.fallback_tenant_name.clone());
        Self {
            id: Uuid::now_v7(),
            service,
            greeting: options.greeting,
            fallback_tenant_name: options.fallback_tenant_name,
            inner: Mutex::new(Inner {
                state: SessionState::default(),
                tenant,
                looked_up: None,
            }),
            events: EventBus::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The backend this session talks to.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Receive every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            session_id: self.id,
            tenant: inner.tenant.clone(),
            state: inner.state.clone(),
        }
    }

    pub fn tenant_name(&self) -> String {
        self.lock().tenant.tenant_name.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().state.is_pending()
    }

    pub fn set_room_number(&self, room_number: &str) -> Result<(), SessionError> {
        transition::set_room_number(&mut self.lock().state, room_number)
    }

    pub fn set_guest_name(&self, guest_name: &str) -> Result<(), SessionError> {
        transition::set_guest_name(&mut self.lock().state, guest_name)
    }

    pub fn set_draft_text(&self, text: &str) -> Result<(), SessionError> {
        transition::set_draft_text(&mut self.lock().state, text)
    }

    /// Log the guest in. No request is made; the room number stays local.
    pub fn authenticate(&self, room_number: &str, guest_name: &str) -> Result<(), SessionError> {
        let mut inner = self.lock();
        transition::authenticate(&mut inner.state, room_number, guest_name, &self.greeting)?;

        info!(session_id = %self.id, "Guest authenticated");
        self.events.publish(SessionEvent::Authenticated {
            guest_name: guest_name.to_string(),
        });
        if let Some(greeting) = inner.state.messages().first() {
            self.events.publish(SessionEvent::MessageAppended {
                index: 0,
                message: greeting.clone(),
            });
        }
        Ok(())
    }

    /// Log in with whatever the credential drafts currently hold.
    pub fn submit_login(&self) -> Result<(), SessionError> {
        let draft = match &self.lock().state {
            SessionState::Unauthenticated(draft) => draft.clone(),
            SessionState::Active(_) => return Err(SessionError::AlreadyAuthenticated),
        };
        self.authenticate(&draft.room_number, &draft.guest_name)
    }

    /// Point the session at a different tenant.
    ///
    /// Returns `true` when the id actually changed, in which case the
    /// display name drops back to the fallback until the next lookup.
    pub fn set_tenant_id(&self, tenant_id: Option<String>) -> bool {
        let mut inner = self.lock();
        if inner.tenant.tenant_id == tenant_id {
            return false;
        }
        inner.tenant.tenant_id = tenant_id;
        inner.looked_up = None;
        self.set_tenant_name(&mut inner, self.fallback_tenant_name.clone());
        true
    }

    /// Look up the display name of `tenant_id`, switching to it first.
    pub async fn fetch_tenant_display_name(&self, tenant_id: &str) -> String {
        self.set_tenant_id(Some(tenant_id.to_string()));
        self.refresh_tenant_name().await
    }

    /// Resolve the display name of the current tenant.
    ///
    /// Issues at most one lookup per distinct tenant id. Failures are
    /// logged and replaced by the fallback name; they never reach the guest.
    /// A result for a tenant id that is no longer current is discarded.
    pub async fn refresh_tenant_name(&self) -> String {
        let tenant_id = {
            let mut inner = self.lock();
            let Some(tenant_id) = inner.tenant.tenant_id.clone() else {
                return inner.tenant.tenant_name.clone();
            };
            if inner.looked_up.as_deref() == Some(tenant_id.as_str()) {
                return inner.tenant.tenant_name.clone();
            }
            inner.looked_up = Some(tenant_id.clone());
            tenant_id
        };

        debug!(tenant_id = %tenant_id, "Looking up tenant display name");
        let span = info_span!("concierge.tenant_lookup", tenant_id = %tenant_id);
        let name = match self.service.fetch_tenant(&tenant_id).instrument(span).await {
            Ok(info) => info.tenant_name,
            Err(e) => {
                warn!(tenant_id = %tenant_id, error = %e, "Tenant lookup failed, using fallback name");
                self.fallback_tenant_name.clone()
            }
        };

        let mut inner = self.lock();
        if inner.tenant.tenant_id.as_deref() != Some(tenant_id.as_str()) {
            debug!(tenant_id = %tenant_id, "Discarding tenant lookup for a superseded tenant");
            return inner.tenant.tenant_name.clone();
        }
        self.set_tenant_name(&mut inner, name.clone());
        name
    }

    /// Send one guest message and append the reply.
    ///
    /// The user message is appended and `pending` raised before the request
    /// goes out. Backend failures are turned into an error notice in the
    /// conversation and reported as [`SendOutcome::Failed`]; only calls the
    /// session refuses outright return `Err`, and those change nothing.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome, SessionError> {
        let request = {
            let mut inner = self.lock();
            let outgoing = transition::begin_send(&mut inner.state, text)?;
            if let Some(message) = inner.state.messages().get(outgoing.index) {
                self.events.publish(SessionEvent::MessageAppended {
                    index: outgoing.index,
                    message: message.clone(),
                });
            }
            self.events.publish(SessionEvent::PendingChanged { pending: true });

            ChatRequest {
                tenant_id: inner.tenant.tenant_id.clone(),
                guest_name: outgoing.guest_name,
                guest_message: outgoing.text,
            }
        };

        debug!(session_id = %self.id, chars = request.guest_message.len(), "Sending guest message");
        let span = info_span!(
            "concierge.chat",
            session_id = %self.id,
            tenant_id = ?request.tenant_id,
        );
        let result = self
            .service
            .send_chat(&request)
            .instrument(span)
            .await
            .map(|response| response.response);

        let mut inner = self.lock();
        let index = transition::complete_send(&mut inner.state, &result)?;
        if let Some(message) = inner.state.messages().get(index) {
            self.events.publish(SessionEvent::MessageAppended {
                index,
                message: message.clone(),
            });
        }
        self.events.publish(SessionEvent::PendingChanged { pending: false });

        Ok(match result {
            Ok(_) => SendOutcome::Replied { index },
            Err(error) => {
                warn!(session_id = %self.id, kind = error.kind(), error = %error, "Chat request failed");
                SendOutcome::Failed { index, error }
            }
        })
    }

    /// Send whatever the message draft currently holds.
    pub async fn submit_draft(&self) -> Result<SendOutcome, SessionError> {
        let draft = match &self.lock().state {
            SessionState::Active(active) => active.draft_text.clone(),
            SessionState::Unauthenticated(_) => return Err(SessionError::NotAuthenticated),
        };
        self.send_message(&draft).await
    }

    fn set_tenant_name(&self, inner: &mut Inner, name: String) {
        if inner.tenant.tenant_name == name {
            return;
        }
        inner.tenant.tenant_name = name.clone();
        self.events
            .publish(SessionEvent::TenantNameChanged { tenant_name: name });
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> std::fmt::Debug for ChatSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
