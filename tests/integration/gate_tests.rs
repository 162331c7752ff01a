//! Access gate integration tests
//!
//! Scenarios from the gate contract: one decision per request, one redirect per
//! denial, failures folded into denials, and no redirect after cancellation.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{Answer, RecordingNavigator, ScriptedAuthority};
    use route_gate::gate::{AccessGate, AccessRequest, AuthDecision, CancelToken, DenialReason, GateSettings};
    use futures::future::join_all;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    fn gate(authority: Arc<ScriptedAuthority>, navigator: Arc<RecordingNavigator>) -> AccessGate {
        AccessGate::new(authority, navigator, GateSettings::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_allowed_after_10ms() {
        let authority = Arc::new(
            ScriptedAuthority::new().then(Duration::from_millis(10), Answer::Authenticated(true)),
        );
        let navigator = Arc::new(RecordingNavigator::default());

        let decision = gate(authority.clone(), navigator.clone())
            .evaluate(AccessRequest::new("/admin"))
            .await;

        assert_eq!(decision, AuthDecision::Allowed);
        assert_eq!(navigator.count(), 0);
        assert_eq!(authority.calls(), 1);
    }

    #[tokio::test]
    async fn test_denied_immediately_redirects_to_root_once() {
        let authority =
            Arc::new(ScriptedAuthority::new().then(Duration::ZERO, Answer::Authenticated(false)));
        let navigator = Arc::new(RecordingNavigator::default());

        let decision = gate(authority.clone(), navigator.clone())
            .evaluate(AccessRequest::new("/admin"))
            .await;

        assert_eq!(decision, AuthDecision::Denied(DenialReason::Unauthenticated));
        assert_eq!(navigator.redirects(), vec!["/".to_string()]);
        assert_eq!(authority.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_authority_unavailable() {
        let authority = Arc::new(
            ScriptedAuthority::new().then(Duration::ZERO, Answer::Fail("network down".to_string())),
        );
        let navigator = Arc::new(RecordingNavigator::default());

        let decision = gate(authority, navigator.clone())
            .evaluate(AccessRequest::new("/admin"))
            .await;

        assert!(matches!(
            decision,
            AuthDecision::Denied(DenialReason::AuthorityUnavailable(ref detail)) if detail.contains("network down")
        ));
        assert_eq!(navigator.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_authority_times_out() {
        let authority = Arc::new(ScriptedAuthority::new().then(Duration::ZERO, Answer::Hang));
        let navigator = Arc::new(RecordingNavigator::default());
        let settings = GateSettings {
            authority_timeout: Duration::from_secs(2),
            ..GateSettings::default()
        };
        let gate = AccessGate::new(authority, navigator.clone(), settings);

        let started = tokio::time::Instant::now();
        let decision = gate.evaluate(AccessRequest::new("/admin")).await;

        assert!(matches!(
            decision,
            AuthDecision::Denied(DenialReason::AuthorityUnavailable(_))
        ));
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(navigator.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_then_late_answer_has_no_effect() {
        let authority = Arc::new(
            ScriptedAuthority::new().then(Duration::from_millis(500), Answer::Authenticated(false)),
        );
        let navigator = Arc::new(RecordingNavigator::default());
        let gate = gate(authority, navigator.clone());
        let token = CancelToken::new();

        let task = {
            let gate = gate.clone();
            let token = token.clone();
            tokio::spawn(async move {
                gate.evaluate_cancellable(AccessRequest::new("/admin"), &token)
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(token.cancel());
        assert_eq!(task.await.unwrap(), None);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(navigator.count(), 0);
    }

    #[tokio::test]
    async fn test_each_request_gets_exactly_one_decision() {
        let mut authority = ScriptedAuthority::new();
        for i in 0..20 {
            authority = authority.then(Duration::ZERO, Answer::Authenticated(i % 3 == 0));
        }
        let authority = Arc::new(authority);
        let navigator = Arc::new(RecordingNavigator::default());
        let gate = gate(authority.clone(), navigator.clone());

        let mut denied = 0;
        for i in 0..20 {
            let evaluation = gate.spawn(AccessRequest::new(format!("/servers/{}", i)));
            let decision = evaluation.wait().await.expect("not cancelled");
            assert!(decision.is_terminal());
            if decision.is_denied() {
                denied += 1;
            }
        }

        assert_eq!(authority.calls(), 20);
        assert_eq!(denied, 13);
        assert_eq!(navigator.count(), denied);
    }

    #[tokio::test]
    async fn test_concurrent_requests_each_get_one_decision() {
        let mut authority = ScriptedAuthority::new();
        for i in 0..20 {
            authority = authority.then(Duration::ZERO, Answer::Authenticated(i % 3 == 0));
        }
        let authority = Arc::new(authority);
        let navigator = Arc::new(RecordingNavigator::default());
        let gate = gate(authority.clone(), navigator.clone());

        let decisions = join_all(
            (0..20).map(|i| gate.evaluate(AccessRequest::new(format!("/servers/{}", i)))),
        )
        .await;

        assert!(decisions.iter().all(AuthDecision::is_terminal));
        assert_eq!(decisions.iter().filter(|d| d.is_allowed()).count(), 7);
        assert_eq!(authority.calls(), 20);
        assert_eq!(navigator.count(), 13);
    }

    #[tokio::test]
    async fn test_evaluation_stays_pending_while_authority_hangs() {
        let authority = Arc::new(ScriptedAuthority::new().then(Duration::ZERO, Answer::Hang));
        let navigator = Arc::new(RecordingNavigator::default());
        let gate = gate(authority, navigator.clone());

        let mut evaluation = task::spawn(gate.evaluate(AccessRequest::new("/admin")));
        assert_pending!(evaluation.poll());
        assert_pending!(evaluation.poll());
        assert_eq!(navigator.count(), 0);
    }

    #[tokio::test]
    async fn test_immediate_answer_is_ready_on_first_poll() {
        let authority =
            Arc::new(ScriptedAuthority::new().then(Duration::ZERO, Answer::Authenticated(true)));
        let navigator = Arc::new(RecordingNavigator::default());
        let gate = gate(authority, navigator.clone());

        let mut evaluation = task::spawn(gate.evaluate(AccessRequest::new("/admin")));
        assert_ready_eq!(evaluation.poll(), AuthDecision::Allowed);
        assert_eq!(navigator.count(), 0);
    }
}
