//! Route table: flattening, matching and guard inheritance

use super::params::RouteParams;
use crate::config::RouteConfig;
use crate::utils::error::{GateError, Result};
use tracing::debug;

/// Path of the catch-all route
pub const WILDCARD: &str = "**";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    /// Segments that would match the same inputs
    fn same_shape(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            (Segment::Param(_), Segment::Param(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct RouteEntry {
    pattern: String,
    segments: Vec<Segment>,
    guarded: bool,
    redirect_to: Option<String>,
}

impl RouteEntry {
    fn matches(&self, parts: &[&str]) -> Option<RouteParams> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.insert(name.as_str(), *part),
            }
        }
        Some(params)
    }
}

/// A route that matched a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Absolute pattern, e.g. `/servers/:id/edit`
    pub pattern: String,
    pub params: RouteParams,
    /// Whether an ancestor gates this route
    pub guarded: bool,
}

/// What a path resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Route(RouteMatch),
    Redirect(String),
}

/// Flattened, ordered route table. The first matching route wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    wildcard: Option<String>,
}

impl RouteTable {
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self> {
        let mut table = Self::default();

        for route in routes {
            if route.path == WILDCARD {
                if table.wildcard.is_some() {
                    return Err(GateError::route("duplicate wildcard route"));
                }
                let target = route
                    .redirect_to
                    .clone()
                    .ok_or_else(|| GateError::route("wildcard route must declare redirect_to"))?;
                table.wildcard = Some(target);
                continue;
            }
            table.flatten(route, "", false)?;
        }

        debug!(
            routes = table.entries.len(),
            wildcard = table.wildcard.is_some(),
            "Route table compiled"
        );
        Ok(table)
    }

    // A parent with an empty-path child is represented by that child, which
    // inherits the parent's guard.
    fn flatten(&mut self, route: &RouteConfig, parent: &str, guarded: bool) -> Result<()> {
        let pattern = join(parent, &route.path);

        if !route.children.iter().any(|c| c.path.is_empty()) {
            self.insert(&pattern, guarded, route.redirect_to.clone())?;
        }

        let children_guarded = guarded || route.guard_children;
        for child in &route.children {
            if child.path == WILDCARD {
                return Err(GateError::route(format!(
                    "wildcard is only allowed at the top level, found under '{}'",
                    pattern
                )));
            }
            self.flatten(child, &pattern, children_guarded)?;
        }
        Ok(())
    }

    fn insert(&mut self, pattern: &str, guarded: bool, redirect_to: Option<String>) -> Result<()> {
        let segments = parse_segments(pattern)?;

        let conflict = self.entries.iter().find(|entry| {
            entry.segments.len() == segments.len()
                && entry
                    .segments
                    .iter()
                    .zip(&segments)
                    .all(|(a, b)| a.same_shape(b))
        });
        if let Some(existing) = conflict {
            return Err(GateError::route(format!(
                "route '{}' conflicts with '{}'",
                pattern, existing.pattern
            )));
        }

        self.entries.push(RouteEntry {
            pattern: pattern.to_string(),
            segments,
            guarded,
            redirect_to,
        });
        Ok(())
    }

    /// Resolve a path; query string and fragment are ignored
    pub fn resolve(&self, path: &str) -> Option<Resolution> {
        let parts = split_path(path);

        for entry in &self.entries {
            if let Some(params) = entry.matches(&parts) {
                if let Some(target) = &entry.redirect_to {
                    return Some(Resolution::Redirect(target.clone()));
                }
                return Some(Resolution::Route(RouteMatch {
                    pattern: entry.pattern.clone(),
                    params,
                    guarded: entry.guarded,
                }));
            }
        }

        self.wildcard.clone().map(Resolution::Redirect)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.wildcard.is_some()
    }

    /// Patterns in match order, with their guard flag
    pub fn patterns(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|e| (e.pattern.as_str(), e.guarded))
    }
}

fn join(parent: &str, child: &str) -> String {
    let segments: Vec<&str> = parent
        .split('/')
        .chain(child.split('/'))
        .filter(|s| !s.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

fn parse_segments(pattern: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    for part in pattern.split('/').filter(|s| !s.is_empty()) {
        if part == WILDCARD {
            return Err(GateError::route(format!(
                "wildcard must be a whole route, found in '{}'",
                pattern
            )));
        }
        match part.strip_prefix(':') {
            Some("") => {
                return Err(GateError::route(format!(
                    "unnamed parameter in '{}'",
                    pattern
                )));
            }
            Some(name) => {
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                {
                    return Err(GateError::route(format!(
                        "parameter '{}' appears twice in '{}'",
                        name, pattern
                    )));
                }
                segments.push(Segment::Param(name.to_string()));
            }
            None => segments.push(Segment::Literal(part.to_string())),
        }
    }
    Ok(segments)
}

fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}
