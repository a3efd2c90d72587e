use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use serde_json::json;

use super::*;

// =============================================================
// Helpers
// =============================================================

/// Replays one scripted response and records the requested path.
struct ScriptedSource {
    response: Result<Value, GuardError>,
    requested: Rc<RefCell<Vec<String>>>,
}

impl StatusSource for ScriptedSource {
    async fn fetch_status(&self, path: &str) -> Result<Value, GuardError> {
        self.requested.borrow_mut().push(path.to_owned());
        self.response.clone()
    }
}

#[derive(Clone, Default)]
struct RecordingNavigator {
    visits: Rc<RefCell<Vec<String>>>,
    refuse: bool,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) -> Result<(), GuardError> {
        if self.refuse {
            return Err(GuardError::Navigation("blocked".to_owned()));
        }
        self.visits.borrow_mut().push(target.to_owned());
        Ok(())
    }
}

struct Run {
    outcome: Outcome,
    requested: Vec<String>,
    visits: Vec<String>,
}

fn run_with(config: GuardConfig, response: Result<Value, GuardError>) -> Run {
    let requested = Rc::new(RefCell::new(Vec::new()));
    let navigator = RecordingNavigator::default();
    let source = ScriptedSource { response, requested: Rc::clone(&requested) };
    let guard = SignInGuard::new(config, source, navigator.clone());
    let outcome = block_on(guard.run());
    let requested = requested.borrow().clone();
    let visits = navigator.visits.borrow().clone();
    Run { outcome, requested, visits }
}

fn run_default(response: Result<Value, GuardError>) -> Run {
    run_with(GuardConfig::default(), response)
}

// =============================================================
// Decision policy
// =============================================================

#[test]
fn signed_in_does_not_navigate() {
    let run = run_default(Ok(json!({"signed-in": true})));
    assert_eq!(run.outcome, Outcome::Allowed);
    assert!(run.visits.is_empty());
}

#[test]
fn signed_out_navigates_home_exactly_once() {
    let run = run_default(Ok(json!({"signed-in": false})));
    assert_eq!(run.outcome, Outcome::Redirected);
    assert_eq!(run.visits, vec!["/".to_owned()]);
}

#[test]
fn missing_flag_navigates_home() {
    let run = run_default(Ok(json!({})));
    assert_eq!(run.outcome, Outcome::Redirected);
    assert_eq!(run.visits, vec!["/".to_owned()]);
}

#[test]
fn string_flag_navigates_home() {
    let run = run_default(Ok(json!({"signed-in": "true"})));
    assert_eq!(run.outcome, Outcome::Redirected);
    assert_eq!(run.visits, vec!["/".to_owned()]);
}

#[test]
fn requests_status_path_once() {
    let run = run_default(Ok(json!({"signed-in": true})));
    assert_eq!(run.requested, vec!["/api/status".to_owned()]);
}

// =============================================================
// Failure policy
// =============================================================

#[test]
fn transport_failure_fails_open_by_default() {
    let err = GuardError::Transport("connection refused".to_owned());
    let run = run_default(Err(err.clone()));
    assert_eq!(run.outcome, Outcome::FailedOpen(err));
    assert!(run.visits.is_empty());
}

#[test]
fn null_body_fails_open_by_default() {
    let run = run_default(Ok(Value::Null));
    assert!(matches!(run.outcome, Outcome::FailedOpen(GuardError::Decode(_))));
    assert!(run.visits.is_empty());
}

#[test]
fn closed_policy_redirects_on_transport_failure() {
    let config = GuardConfig::default().with_failure_policy(FailurePolicy::Closed);
    let err = GuardError::Transport("connection refused".to_owned());
    let run = run_with(config, Err(err.clone()));
    assert_eq!(run.outcome, Outcome::FailedClosed(err));
    assert!(run.outcome.navigated());
    assert_eq!(run.visits, vec!["/".to_owned()]);
}

#[test]
fn closed_policy_still_allows_signed_in() {
    let config = GuardConfig::default().with_failure_policy(FailurePolicy::Closed);
    let run = run_with(config, Ok(json!({"signed-in": true})));
    assert_eq!(run.outcome, Outcome::Allowed);
    assert!(run.visits.is_empty());
}

// =============================================================
// Configuration and navigation errors
// =============================================================

#[test]
fn custom_paths_are_used() {
    let config = GuardConfig::default()
        .with_status_path("/api/session")
        .with_redirect_to("/login");
    let run = run_with(config, Ok(json!({"signed-in": false})));
    assert_eq!(run.requested, vec!["/api/session".to_owned()]);
    assert_eq!(run.visits, vec!["/login".to_owned()]);
}

#[test]
fn refused_navigation_is_reported_in_outcome() {
    let navigator = RecordingNavigator { refuse: true, ..RecordingNavigator::default() };
    let source = ScriptedSource {
        response: Ok(json!({"signed-in": false})),
        requested: Rc::new(RefCell::new(Vec::new())),
    };
    let guard = SignInGuard::new(GuardConfig::default(), source, navigator.clone());
    let outcome = block_on(guard.run());
    assert_eq!(outcome, Outcome::NavigationFailed(GuardError::Navigation("blocked".to_owned())));
    assert!(!outcome.navigated());
    assert!(navigator.visits.borrow().is_empty());
}
