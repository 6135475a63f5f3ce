use thiserror::Error;

/// Bubble text for a request that never made it onto the wire.
pub const CONNECTIVITY_TEXT: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

/// Bubble text for a request that was sent but never answered.
pub const NO_RESPONSE_TEXT: &str =
    "No response received from server. Please check your connection.";

/// Failures talking to the concierge backend.
///
/// `Display` is the diagnostic form for logs; the guest sees
/// [`ConciergeError::bubble_text`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConciergeError {
    /// The backend answered with a non-2xx status.
    #[error("concierge service returned HTTP {status}")]
    Server {
        status: u16,
        /// Backend `error` field, when the body carried one.
        detail: Option<String>,
    },

    /// The request was sent but no answer arrived (timeout, reset, refused).
    #[error("no response from concierge service: {reason}")]
    NoResponse { reason: String },

    /// The request could not be built or dispatched.
    #[error("could not reach concierge service: {reason}")]
    Connectivity { reason: String },

    /// A 2xx answer whose body is not the expected JSON.
    #[error("malformed concierge response: {reason}")]
    MalformedResponse { reason: String },
}

impl ConciergeError {
    /// Text appended to the conversation when a chat request fails.
    pub fn bubble_text(&self) -> String {
        match self {
            ConciergeError::Server { status, .. } => format!("Server error: {status}"),
            ConciergeError::NoResponse { .. } => NO_RESPONSE_TEXT.to_string(),
            ConciergeError::Connectivity { .. } | ConciergeError::MalformedResponse { .. } => {
                CONNECTIVITY_TEXT.to_string()
            }
        }
    }

    /// Short machine-friendly label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ConciergeError::Server { .. } => "server_error",
            ConciergeError::NoResponse { .. } => "no_response",
            ConciergeError::Connectivity { .. } => "connectivity",
            ConciergeError::MalformedResponse { .. } => "malformed_response",
        }
    }
}

/// Calls a chat session refuses. A rejected call changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("room number and guest name are both required")]
    MissingCredentials,

    #[error("session is already authenticated")]
    AlreadyAuthenticated,

    #[error("session is not authenticated")]
    NotAuthenticated,

    #[error("message is empty")]
    EmptyMessage,

    #[error("a message is already awaiting a reply")]
    Busy,
}

/// Errors loading the client configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid base url '{0}'")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
