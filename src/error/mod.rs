use thiserror::Error;

/// Why a provider round trip failed.
///
/// Every variant is terminal for the call that produced it: nothing in the
/// crate retries or substitutes a fallback result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request never got a response (DNS, TLS, connection reset, ...)
    #[error("connection failed: {0}")]
    Connection(String),
    /// The optional request deadline elapsed
    #[error("request timed out")]
    Timeout,
    /// The API key was rejected (401/403)
    #[error("API key rejected")]
    Unauthorized,
    /// The provider is throttling this key (429)
    #[error("rate limited")]
    RateLimited,
    /// The provider refused the request as malformed (400)
    #[error("bad request: {details}")]
    BadRequest { details: String },
    /// Provider-side failure (5xx)
    #[error("server error ({status}): {details}")]
    ServerError { status: u16, details: String },
    /// Any other non-success status
    #[error("unexpected status ({status}): {details}")]
    UnexpectedStatus { status: u16, details: String },
    /// The provider declined to answer, e.g. a safety block on the prompt
    #[error("request blocked: {reason}")]
    Blocked { reason: String },
    /// The provider answered without any text to decode
    #[error("no text content in response")]
    EmptyResponse,
    /// The provider's response envelope could not be read
    #[error("unreadable response: {details}")]
    InvalidEnvelope { details: String },
}

impl TransportErrorKind {
    /// Map a non-success HTTP status to a kind.
    pub fn from_status(status: u16, details: impl Into<String>) -> Self {
        let details = details.into();
        match status {
            400 => Self::BadRequest { details },
            401 | 403 => Self::Unauthorized,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError { status, details },
            _ => Self::UnexpectedStatus { status, details },
        }
    }
}

/// Error types for catlens.
///
/// A successful analysis that finds no cat is *not* an error; it is an
/// [`AnalysisResult`](crate::AnalysisResult) whose `is_cat` is `false`.
///
/// # Examples
///
/// ```
/// use catlens::{CatLensError, Result};
///
/// fn require_key(key: Option<&str>) -> Result<&str> {
///     key.filter(|k| !k.is_empty())
///         .ok_or_else(|| CatLensError::Configuration("GEMINI_API_KEY is not set".into()))
/// }
///
/// match require_key(None) {
///     Err(CatLensError::Configuration(msg)) => println!("cannot start: {}", msg),
///     Err(e) => println!("unexpected error: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum CatLensError {
    /// Required startup configuration is missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider call failed
    #[error("{provider} transport error: {kind}")]
    Transport {
        provider: String,
        kind: TransportErrorKind,
    },

    /// The provider's answer does not conform to the analysis schema
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The image reference could not be turned into a payload
    #[error("Image error: {0}")]
    Image(String),
}

impl CatLensError {
    pub fn transport(provider: impl Into<String>, kind: TransportErrorKind) -> Self {
        Self::Transport {
            provider: provider.into(),
            kind,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation(_))
    }

    /// The transport failure kind, if this is a transport error.
    pub fn transport_kind(&self) -> Option<&TransportErrorKind> {
        match self {
            Self::Transport { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

impl PartialEq for CatLensError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Configuration(a), Self::Configuration(b)) => a == b,
            (
                Self::Transport {
                    provider: pa,
                    kind: ka,
                },
                Self::Transport {
                    provider: pb,
                    kind: kb,
                },
            ) => pa == pb && ka == kb,
            (Self::SchemaViolation(a), Self::SchemaViolation(b)) => a == b,
            (Self::Image(a), Self::Image(b)) => a == b,
            _ => false,
        }
    }
}

/// A specialized Result type for catlens operations.
pub type Result<T> = std::result::Result<T, CatLensError>;
