//! The access gate
//!
//! Every evaluation queries the authority once, resolves to a single terminal
//! decision and issues at most one redirect.

use super::authority::AuthoritySource;
use super::cancel::CancelToken;
use super::navigator::Navigator;
use super::types::{AccessRequest, AuthDecision, DenialReason, RequestId};
use crate::config::GateConfig;
use crate::utils::error::GateError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Runtime settings of a gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSettings {
    /// Where denied requests are sent unless they carry their own target
    pub fallback: String,
    /// Upper bound on a single authority check
    pub authority_timeout: Duration,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self::from(&GateConfig::default())
    }
}

impl From<&GateConfig> for GateSettings {
    fn from(config: &GateConfig) -> Self {
        Self {
            fallback: config.fallback.clone(),
            authority_timeout: config.authority_timeout(),
        }
    }
}

/// Authorization checkpoint in front of a navigation step
#[derive(Clone)]
pub struct AccessGate {
    authority: Arc<dyn AuthoritySource>,
    navigator: Arc<dyn Navigator>,
    settings: Arc<GateSettings>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl AccessGate {
    /// Build a gate over caller-owned collaborators
    pub fn new(
        authority: Arc<dyn AuthoritySource>,
        navigator: Arc<dyn Navigator>,
        settings: GateSettings,
    ) -> Self {
        Self {
            authority,
            navigator,
            settings: Arc::new(settings),
        }
    }

    /// Get the gate settings
    pub fn settings(&self) -> &GateSettings {
        &self.settings
    }

    /// Evaluate a request to completion
    pub async fn evaluate(&self, request: AccessRequest) -> AuthDecision {
        let decision = self.check(&request).await;
        self.apply(&request, decision).await
    }

    /// Evaluate a request the caller may abandon.
    ///
    /// Returns `None` when `token` was cancelled before the decision committed.
    /// No redirect is issued in that case.
    pub async fn evaluate_cancellable(
        &self,
        request: AccessRequest,
        token: &CancelToken,
    ) -> Option<AuthDecision> {
        if token.is_cancelled() {
            debug!(request_id = %request.id(), path = request.target(), "Request abandoned before evaluation");
            return None;
        }

        let decision = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(request_id = %request.id(), path = request.target(), "Request abandoned while awaiting authority");
                return None;
            }
            decision = self.check(&request) => decision,
        };

        if !token.commit() {
            debug!(request_id = %request.id(), %decision, "Discarding decision for abandoned request");
            return None;
        }

        Some(self.apply(&request, decision).await)
    }

    /// Run the evaluation on the runtime and hand back an observable handle
    pub fn spawn(&self, request: AccessRequest) -> Evaluation {
        let id = request.id();
        let token = CancelToken::new();
        let (cell, decision) = watch::channel(AuthDecision::Pending);

        let gate = self.clone();
        let task_token = token.clone();
        tokio::spawn(async move {
            if let Some(resolved) = gate.evaluate_cancellable(request, &task_token).await {
                cell.send_if_modified(|current| {
                    if current.is_terminal() {
                        return false;
                    }
                    *current = resolved;
                    true
                });
            }
        });

        Evaluation {
            id,
            token,
            decision,
        }
    }

    async fn check(&self, request: &AccessRequest) -> AuthDecision {
        debug!(request_id = %request.id(), path = request.target(), "Querying authority");

        let timeout = self.settings.authority_timeout;
        match tokio::time::timeout(timeout, self.authority.check_authenticated()).await {
            Ok(Ok(true)) => AuthDecision::Allowed,
            Ok(Ok(false)) => AuthDecision::Denied(DenialReason::Unauthenticated),
            Ok(Err(e)) => {
                warn!(request_id = %request.id(), error = %e, "Authority check failed");
                AuthDecision::Denied(DenialReason::AuthorityUnavailable(e.to_string()))
            }
            Err(_) => {
                let e = GateError::timeout(format!("no answer within {}ms", timeout.as_millis()));
                warn!(request_id = %request.id(), error = %e, "Authority check timed out");
                AuthDecision::Denied(DenialReason::AuthorityUnavailable(e.to_string()))
            }
        }
    }

    async fn apply(&self, request: &AccessRequest, decision: AuthDecision) -> AuthDecision {
        match &decision {
            AuthDecision::Denied(reason) => {
                let destination = request.redirect_to().unwrap_or(self.settings.fallback.as_str());
                info!(
                    request_id = %request.id(),
                    path = request.target(),
                    %reason,
                    destination,
                    "Access denied, redirecting"
                );
                if let Err(e) = self.navigator.redirect_to(destination).await {
                    warn!(request_id = %request.id(), destination, error = %e, "Redirect failed");
                }
            }
            _ => {
                debug!(request_id = %request.id(), path = request.target(), "Access allowed");
            }
        }
        decision
    }
}

/// Handle to an evaluation running on the runtime
///
/// Dropping the handle abandons the request.
#[derive(Debug)]
pub struct Evaluation {
    id: RequestId,
    token: CancelToken,
    decision: watch::Receiver<AuthDecision>,
}

impl Evaluation {
    /// Get the identifier of the evaluated request
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Current decision; `Pending` until the evaluation resolves
    pub fn decision(&self) -> AuthDecision {
        self.decision.borrow().clone()
    }

    /// Abandon the request. Returns `false` if the decision already committed.
    pub fn cancel(&self) -> bool {
        self.token.cancel()
    }

    /// Wait for the terminal decision; `None` if the request was abandoned
    pub async fn wait(mut self) -> Option<AuthDecision> {
        self.decision
            .wait_for(AuthDecision::is_terminal)
            .await
            .map(|decision| (*decision).clone())
            .ok()
    }
}

impl Drop for Evaluation {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
