//! Routing
//!
//! Resolves paths against a [`RouteTable`], asks the access gate before
//! activating children of guarded routes and publishes the [`ActivatedRoute`]
//! so consumers can react to parameter changes.

mod location;
mod params;
mod router;
mod table;

pub use location::Location;
pub use params::RouteParams;
pub use router::{ActivatedRoute, MAX_REDIRECTS, NavigationOutcome, Router};
pub use table::{Resolution, RouteMatch, RouteTable, WILDCARD};
