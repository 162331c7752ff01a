//! Request and decision types for the access gate

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identity of a single gated request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The operation being gated
///
/// Built once through the `with_*` methods and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRequest {
    id: RequestId,
    target: String,
    redirect_to: Option<String>,
    params: BTreeMap<String, String>,
}

impl AccessRequest {
    /// Create a request for the given target path
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            target: target.into(),
            redirect_to: None,
            params: BTreeMap::new(),
        }
    }

    /// Override the gate's fallback destination for this request
    pub fn with_redirect(mut self, destination: impl Into<String>) -> Self {
        self.redirect_to = Some(destination.into());
        self
    }

    /// Attach a contextual parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Attach several contextual parameters
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Get the request identifier
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Get the gated target path
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the per-request redirect override
    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }

    /// Get all contextual parameters
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Get one contextual parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Why a request was denied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DenialReason {
    /// The authority answered and the principal is not authenticated
    Unauthenticated,
    /// The authority failed or did not answer in time
    AuthorityUnavailable(String),
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "principal is not authenticated"),
            Self::AuthorityUnavailable(detail) => write!(f, "authority unavailable: {}", detail),
        }
    }
}

/// Outcome of a gate evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum AuthDecision {
    /// The authority has not answered yet
    Pending,
    /// The operation may proceed
    Allowed,
    /// The operation must not proceed
    Denied(DenialReason),
}

impl AuthDecision {
    /// `Allowed` and `Denied` are terminal; `Pending` is not
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }

    /// Get the reason when denied
    pub fn denial_reason(&self) -> Option<&DenialReason> {
        match self {
            Self::Denied(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for AuthDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Allowed => write!(f, "allowed"),
            Self::Denied(reason) => write!(f, "denied ({})", reason),
        }
    }
}
