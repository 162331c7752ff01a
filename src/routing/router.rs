//! Router that consults the access gate before activating guarded routes

use super::location::Location;
use super::params::RouteParams;
use super::table::{Resolution, RouteTable};
use crate::gate::{
    AccessGate, AccessRequest, AuthDecision, AuthoritySource, CancelToken, DenialReason,
    GateSettings,
};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Route redirects followed before a navigation is abandoned
pub const MAX_REDIRECTS: usize = 8;

/// The route the router currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivatedRoute {
    /// Concrete path that was activated
    pub path: String,
    /// Pattern it matched
    pub pattern: String,
    pub params: RouteParams,
}

/// Result of a navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// The route was activated
    Activated(ActivatedRoute),
    /// The gate denied the route; the location was redirected
    Blocked(DenialReason),
    /// No route matched and there is no wildcard
    NotFound(String),
    /// Redirects did not settle within [`MAX_REDIRECTS`] hops
    RedirectLoop(String),
    /// A later navigation or an explicit cancel took over
    Superseded,
}

impl NavigationOutcome {
    pub fn is_activated(&self) -> bool {
        matches!(self, Self::Activated(_))
    }

    /// Get the activated route, if any
    pub fn activated(&self) -> Option<&ActivatedRoute> {
        match self {
            Self::Activated(route) => Some(route),
            _ => None,
        }
    }
}

impl fmt::Display for NavigationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activated(route) => write!(f, "activated {} ({})", route.path, route.pattern),
            Self::Blocked(reason) => write!(f, "blocked: {}", reason),
            Self::NotFound(path) => write!(f, "not found: {}", path),
            Self::RedirectLoop(path) => write!(f, "redirect loop starting at {}", path),
            Self::Superseded => write!(f, "superseded"),
        }
    }
}

#[derive(Debug, Default)]
struct InFlight {
    seq: u64,
    token: Option<CancelToken>,
}

/// Resolves paths, runs guarded routes through the gate and publishes the
/// activated route. Only the most recent navigation may commit.
pub struct Router {
    table: RouteTable,
    gate: AccessGate,
    location: Arc<Location>,
    current: watch::Sender<Option<ActivatedRoute>>,
    in_flight: Mutex<InFlight>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Build a router with its own location starting at `/`
    pub fn new(
        table: RouteTable,
        authority: Arc<dyn AuthoritySource>,
        settings: GateSettings,
    ) -> Self {
        Self::with_location(table, authority, Arc::new(Location::default()), settings)
    }

    /// Build a router whose gate redirects through `location`
    pub fn with_location(
        table: RouteTable,
        authority: Arc<dyn AuthoritySource>,
        location: Arc<Location>,
        settings: GateSettings,
    ) -> Self {
        let gate = AccessGate::new(authority, location.clone(), settings);
        let (current, _) = watch::channel(None);
        Self {
            table,
            gate,
            location,
            current,
            in_flight: Mutex::new(InFlight::default()),
        }
    }

    /// Get the compiled route table
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Get the gate guarded routes go through
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Get the location the router drives
    pub fn location(&self) -> &Arc<Location> {
        &self.location
    }

    /// Get the currently activated route
    pub fn current(&self) -> Option<ActivatedRoute> {
        self.current.borrow().clone()
    }

    /// Observe activated routes and their parameters
    pub fn subscribe(&self) -> watch::Receiver<Option<ActivatedRoute>> {
        self.current.subscribe()
    }

    /// Abandon the in-flight navigation, if any.
    ///
    /// Returns `true` if a navigation was abandoned before committing.
    pub fn cancel_pending(&self) -> bool {
        let token = self.in_flight.lock().token.take();
        match token {
            Some(token) if token.cancel() => {
                debug!("Pending navigation cancelled");
                true
            }
            _ => false,
        }
    }

    /// Navigate to `path`, superseding any navigation still in flight
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        let (seq, token) = self.begin(path);
        let outcome = self.run(path, seq, &token).await;
        self.finish(seq);

        info!(path, %outcome, "Navigation finished");
        outcome
    }

    async fn run(&self, path: &str, seq: u64, token: &CancelToken) -> NavigationOutcome {
        let mut target = path.to_string();

        for _ in 0..=MAX_REDIRECTS {
            if !target.starts_with('/') {
                debug!(path = %target, "Rejecting relative path");
                return NavigationOutcome::NotFound(target);
            }

            let matched = match self.table.resolve(&target) {
                None => return NavigationOutcome::NotFound(target),
                Some(Resolution::Redirect(to)) => {
                    debug!(from = %target, to = %to, "Following route redirect");
                    target = to;
                    continue;
                }
                Some(Resolution::Route(matched)) => matched,
            };

            if matched.guarded {
                let request = AccessRequest::new(target.clone()).with_params(matched.params.iter());
                match self.gate.evaluate_cancellable(request, token).await {
                    None => return NavigationOutcome::Superseded,
                    Some(AuthDecision::Denied(reason)) => {
                        self.settle_on_fallback(seq, token);
                        return NavigationOutcome::Blocked(reason);
                    }
                    Some(_) => {}
                }
            }

            let route = ActivatedRoute {
                path: target,
                pattern: matched.pattern,
                params: matched.params,
            };
            return if self.commit(seq, token, &route, true) {
                NavigationOutcome::Activated(route)
            } else {
                NavigationOutcome::Superseded
            };
        }

        warn!(path, "Too many route redirects");
        NavigationOutcome::RedirectLoop(path.to_string())
    }

    fn begin(&self, path: &str) -> (u64, CancelToken) {
        let token = CancelToken::new();
        let mut in_flight = self.in_flight.lock();

        if let Some(previous) = in_flight.token.replace(token.clone()) {
            if previous.cancel() {
                debug!(path, "Superseding in-flight navigation");
            }
        }
        in_flight.seq += 1;

        (in_flight.seq, token)
    }

    fn finish(&self, seq: u64) {
        let mut in_flight = self.in_flight.lock();
        if in_flight.seq == seq {
            in_flight.token = None;
        }
    }

    fn commit(
        &self,
        seq: u64,
        token: &CancelToken,
        route: &ActivatedRoute,
        move_location: bool,
    ) -> bool {
        let in_flight = self.in_flight.lock();
        if in_flight.seq != seq || !token.commit() {
            debug!(path = %route.path, "Dropping stale activation");
            return false;
        }

        if move_location {
            if let Err(e) = self.location.go(&route.path) {
                warn!(path = %route.path, error = %e, "Failed to update location, route not activated");
                return false;
            }
        }
        self.current.send_replace(Some(route.clone()));
        true
    }

    // Activate the gate's fallback when the redirect landed there and it is
    // an open route, so `current` agrees with the location.
    fn settle_on_fallback(&self, seq: u64, token: &CancelToken) {
        let fallback = self.gate.settings().fallback.as_str();
        let location = self.location.path();
        if location != fallback {
            debug!(location = %location, fallback, "Redirect did not reach the fallback, leaving current route");
            return;
        }

        match self.table.resolve(fallback) {
            Some(Resolution::Route(matched)) if !matched.guarded => {
                let route = ActivatedRoute {
                    path: location,
                    pattern: matched.pattern,
                    params: matched.params,
                };
                self.commit(seq, token, &route, false);
            }
            _ => debug!(fallback, "Fallback is not an open route, leaving current route"),
        }
    }
}
