//! Route table configuration

use serde::{Deserialize, Serialize};

/// A route definition as written in configuration
///
/// `path` is relative to the parent and may contain `:name` parameter
/// segments. `**` matches anything not matched elsewhere and must redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,
    /// Gate every descendant of this route; the route itself stays open
    #[serde(default)]
    pub guard_children: bool,
    /// Send navigations for this route elsewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteConfig>,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            guard_children: false,
            redirect_to: None,
            children: Vec::new(),
        }
    }

    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            redirect_to: Some(to.into()),
            ..Self::new(path)
        }
    }

    pub fn guarded(mut self) -> Self {
        self.guard_children = true;
        self
    }

    pub fn with_child(mut self, child: RouteConfig) -> Self {
        self.children.push(child);
        self
    }
}

/// Route table of the routing sample application
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new(""),
        RouteConfig::new("users").with_child(RouteConfig::new(":id/:name")),
        RouteConfig::new("servers")
            .guarded()
            .with_child(RouteConfig::new(":id"))
            .with_child(RouteConfig::new(":id/edit")),
        RouteConfig::new("not-found"),
        RouteConfig::redirect("**", "/not-found"),
    ]
}
