//! Router integration tests
//!
//! Exercise the recipe book route table the way its components consume it:
//! the edit view derives its mode from the presence of an `id` parameter.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::recipe_routes;
    use route_gate::gate::{GateSettings, SessionAuthority};
    use route_gate::routing::{ActivatedRoute, Location, NavigationOutcome, RouteTable, Router};
    use route_gate::DenialReason;
    use std::sync::Arc;
    use std::time::Duration;

    /// Mode of the recipe edit view
    #[derive(Debug, PartialEq, Eq)]
    enum EditMode {
        Create,
        Edit(u32),
    }

    fn edit_mode(route: &ActivatedRoute) -> EditMode {
        if route.params.contains("id") {
            EditMode::Edit(route.params.parse("id").unwrap())
        } else {
            EditMode::Create
        }
    }

    fn recipe_router(authority: Arc<SessionAuthority>) -> Router {
        let table = RouteTable::from_config(&recipe_routes()).unwrap();
        let settings = GateSettings {
            fallback: "/signin".to_string(),
            ..GateSettings::default()
        };
        Router::with_location(table, authority, Arc::new(Location::new("/")), settings)
    }

    #[tokio::test(start_paused = true)]
    async fn test_logged_out_edit_is_blocked_to_signin() {
        let authority = Arc::new(SessionAuthority::new(Duration::from_millis(800)));
        let router = recipe_router(authority);

        let outcome = router.navigate("/recipes/4/edit").await;

        assert_eq!(outcome, NavigationOutcome::Blocked(DenialReason::Unauthenticated));
        assert_eq!(router.location().path(), "/signin");
        assert_eq!(router.current().map(|r| r.pattern), Some("/signin".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_and_new_modes() {
        let authority = Arc::new(SessionAuthority::new(Duration::from_millis(800)));
        authority.login();
        let router = recipe_router(authority);

        let outcome = router.navigate("/recipes/4/edit").await;
        assert_eq!(edit_mode(outcome.activated().unwrap()), EditMode::Edit(4));

        let outcome = router.navigate("/recipes/new").await;
        assert_eq!(edit_mode(outcome.activated().unwrap()), EditMode::Create);
    }

    #[tokio::test]
    async fn test_root_redirects_to_recipes_list() {
        let router = recipe_router(Arc::new(SessionAuthority::new(Duration::ZERO)));

        let outcome = router.navigate("/").await;

        assert_eq!(outcome.activated().map(|r| r.path.as_str()), Some("/recipes"));
        assert_eq!(router.location().path(), "/recipes");
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_then_navigate_is_blocked() {
        let authority = Arc::new(SessionAuthority::new(Duration::from_millis(100)));
        authority.login();
        let router = recipe_router(authority.clone());

        assert!(router.navigate("/recipes/1").await.is_activated());

        authority.logout();
        let outcome = router.navigate("/recipes/2").await;
        assert!(matches!(outcome, NavigationOutcome::Blocked(_)));
        assert_eq!(
            router.location().history(),
            vec!["/", "/recipes/1", "/signin"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_navigation_keeps_only_latest() {
        let authority = Arc::new(SessionAuthority::new(Duration::from_millis(800)));
        authority.login();
        let router = Arc::new(recipe_router(authority));

        let mut tasks = Vec::new();
        for id in 1..=3 {
            let router = router.clone();
            tasks.push(tokio::spawn(async move {
                router.navigate(&format!("/recipes/{}", id)).await
            }));
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        let mut outcomes = Vec::new();
        for task in tasks {
            outcomes.push(task.await.unwrap());
        }

        assert_eq!(outcomes[0], NavigationOutcome::Superseded);
        assert_eq!(outcomes[1], NavigationOutcome::Superseded);
        assert_eq!(
            outcomes[2].activated().map(|r| r.path.as_str()),
            Some("/recipes/3")
        );
        assert_eq!(router.location().history(), vec!["/", "/recipes/3"]);
    }
}
