//! Test fixtures and fakes
//!
//! Fakes implement the public collaborator traits; nothing here reaches into
//! crate internals.

use async_trait::async_trait;
use parking_lot::Mutex;
use route_gate::config::RouteConfig;
use route_gate::{AuthoritySource, GateError, Navigator, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Navigator that records every redirect
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.redirects.lock().len()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn redirect_to(&self, destination: &str) -> Result<()> {
        self.redirects.lock().push(destination.to_string());
        Ok(())
    }
}

/// One scripted authority answer
#[derive(Debug, Clone)]
pub enum Answer {
    Authenticated(bool),
    Fail(String),
    Hang,
}

/// Authority that plays back answers in order, each after an optional delay
#[derive(Debug, Default)]
pub struct ScriptedAuthority {
    script: Mutex<VecDeque<(Duration, Answer)>>,
    calls: AtomicUsize,
}

impl ScriptedAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, delay: Duration, answer: Answer) -> Self {
        self.script.lock().push_back((delay, answer));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthoritySource for ScriptedAuthority {
    async fn check_authenticated(&self) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        let (delay, answer) =
            next.ok_or_else(|| GateError::authority("script exhausted"))?;

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match answer {
            Answer::Authenticated(value) => Ok(value),
            Answer::Fail(message) => Err(GateError::authority(message)),
            Answer::Hang => std::future::pending().await,
        }
    }
}

/// Route table of the recipe book application
pub fn recipe_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::redirect("", "/recipes"),
        RouteConfig::new("recipes")
            .guarded()
            .with_child(RouteConfig::new("start"))
            .with_child(RouteConfig::new("new"))
            .with_child(RouteConfig::new(":id"))
            .with_child(RouteConfig::new(":id/edit")),
        RouteConfig::new("shopping-list"),
        RouteConfig::new("signin"),
    ]
}
