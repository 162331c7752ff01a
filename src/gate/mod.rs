//! Access gate
//!
//! Decides whether a navigation step may proceed by asking an
//! [`AuthoritySource`] once per request. Denied requests are redirected through
//! a [`Navigator`] exactly once; authority failures and timeouts are folded into
//! [`DenialReason::AuthorityUnavailable`] rather than surfaced as errors.
//!
//! ```rust,no_run
//! use route_gate::gate::{AccessGate, AccessRequest, GateSettings, StaticAuthority};
//! use route_gate::routing::Location;
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let location = Arc::new(Location::new("/"));
//! let gate = AccessGate::new(
//!     Arc::new(StaticAuthority::denying()),
//!     location.clone(),
//!     GateSettings::default(),
//! );
//!
//! let decision = gate.evaluate(AccessRequest::new("/admin")).await;
//! assert!(decision.is_denied());
//! assert_eq!(location.path(), "/");
//! # }
//! ```

mod access_gate;
pub mod authority;
mod cancel;
pub mod navigator;
mod types;

pub use access_gate::{AccessGate, Evaluation, GateSettings};
pub use authority::{AuthoritySource, FailingAuthority, SessionAuthority, StaticAuthority};
pub use cancel::CancelToken;
pub use navigator::Navigator;
pub use types::{AccessRequest, AuthDecision, DenialReason, RequestId};
