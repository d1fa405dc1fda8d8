//! Debounced payee-account validator
//!
//! Wraps the external payee-account check so that a burst of edits collapses
//! into a single request for the final value.
//!
//! # Sequencing
//!
//! Every edit bumps a monotonically increasing sequence number. A timer task
//! is spawned per edit; when it fires it only issues the request if its
//! sequence number is still the current one, which is how restarting the
//! window works without cancelling anything. Request results go through the
//! same check before they are applied, so a response for a superseded value
//! can never overwrite the state of a newer one, even though the request
//! itself was not cancelled.
//!
//! The current state is published on a `tokio::sync::watch` channel. Check
//! and update happen inside a single `send_if_modified` call, so there is no
//! window between reading the sequence number and applying a result.

use crate::core::traits::PayeeAccountChecker;
use crate::types::FormError;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Lifecycle of the check for the current payee-account value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Nothing to check (field empty)
    Idle,
    /// Waiting for the quiescence window to pass
    Scheduled,
    /// Request issued, no answer yet
    InFlight,
    Valid,
    Invalid,
    /// The check could not be completed
    Fault,
}

impl CheckStatus {
    /// Whether the check for the current value has an answer
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            CheckStatus::Valid | CheckStatus::Invalid | CheckStatus::Fault
        )
    }

    /// Whether a timer or request is still outstanding
    pub fn is_pending(self) -> bool {
        matches!(self, CheckStatus::Scheduled | CheckStatus::InFlight)
    }
}

/// Published state of the payee-account check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSnapshot {
    /// Sequence number of the latest edit
    pub seq: u64,
    /// Value the status belongs to
    pub value: String,
    pub status: CheckStatus,
}

impl Default for CheckSnapshot {
    fn default() -> Self {
        CheckSnapshot {
            seq: 0,
            value: String::new(),
            status: CheckStatus::Idle,
        }
    }
}

/// Debounced, staleness-aware wrapper around a [`PayeeAccountChecker`]
pub struct PayeeAccountValidator {
    checker: Arc<dyn PayeeAccountChecker>,
    window: Duration,
    state: Arc<watch::Sender<CheckSnapshot>>,
}

impl PayeeAccountValidator {
    /// Create a validator with the given quiescence window
    pub fn new(checker: Arc<dyn PayeeAccountChecker>, window: Duration) -> Self {
        let (state, _) = watch::channel(CheckSnapshot::default());
        PayeeAccountValidator {
            checker,
            window,
            state: Arc::new(state),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Current state
    pub fn snapshot(&self) -> CheckSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that sees every published state change
    pub fn subscribe(&self) -> watch::Receiver<CheckSnapshot> {
        self.state.subscribe()
    }

    /// Record an edit and (re)start the quiescence window
    ///
    /// Surrounding whitespace is ignored. Re-entering the current value keeps
    /// its state unless the last check faulted, in which case it is retried.
    /// An empty value clears the state immediately and never reaches the
    /// network. Outside a tokio runtime the timer cannot be started; the value
    /// stays `Scheduled` until [`resolve`](Self::resolve) forces it.
    pub fn schedule(&self, value: &str) -> CheckStatus {
        let value = value.trim();
        let current = self.snapshot();
        if current.value == value && current.status != CheckStatus::Fault {
            return current.status;
        }

        let empty = value.is_empty();
        let status = if empty {
            CheckStatus::Idle
        } else {
            CheckStatus::Scheduled
        };
        let seq = self.publish_edit(value, status);

        if empty {
            debug!(seq, "payee account cleared, pending checks dropped");
            return status;
        }

        let Ok(handle) = Handle::try_current() else {
            debug!(seq, "no runtime available, payee account check deferred");
            return status;
        };

        let state = Arc::clone(&self.state);
        let checker = Arc::clone(&self.checker);
        let window = self.window;
        let value = value.to_string();
        handle.spawn(async move {
            tokio::time::sleep(window).await;
            if !mark_in_flight(&state, seq) {
                debug!(seq, "debounce window restarted, timer discarded");
                return;
            }
            run_check(checker.as_ref(), &state, seq, &value).await;
        });

        status
    }

    /// Wait until the current value's check is no longer pending
    pub async fn settled(&self) -> Result<CheckSnapshot, FormError> {
        let mut rx = self.state.subscribe();
        let snapshot = rx
            .wait_for(|s| !s.status.is_pending())
            .await
            .map_err(|_| FormError::check_abandoned(&self.snapshot().value))?;
        Ok(snapshot.clone())
    }

    /// Decide validity of `value` now, for submission
    ///
    /// - Already settled for this value: returns that answer.
    /// - Still inside the window: issues the check immediately; the waiting
    ///   timer becomes stale. The request keeps running if this future is
    ///   dropped.
    /// - Request in flight: waits for it.
    ///
    /// Never returns `Scheduled` or `InFlight`.
    pub async fn resolve(&self, value: &str) -> Result<CheckStatus, FormError> {
        let value = value.trim();
        loop {
            let snapshot = self.snapshot();

            if snapshot.value != value {
                self.schedule(value);
                continue;
            }

            match snapshot.status {
                CheckStatus::Idle => return Ok(CheckStatus::Idle),
                status if status.is_settled() => return Ok(status),
                CheckStatus::Scheduled => {
                    let seq = self.publish_edit(value, CheckStatus::InFlight);
                    debug!(seq, "forcing payee account check");
                    // Detached so that dropping this future cannot strand the check
                    let Ok(handle) = Handle::try_current() else {
                        return Ok(run_check(self.checker.as_ref(), &self.state, seq, value).await);
                    };
                    let state = Arc::clone(&self.state);
                    let checker = Arc::clone(&self.checker);
                    let value = value.to_string();
                    handle.spawn(async move {
                        run_check(checker.as_ref(), &state, seq, &value).await;
                    });
                }
                _ => {
                    let seq = snapshot.seq;
                    let mut rx = self.state.subscribe();
                    rx.wait_for(|s| s.seq != seq || s.status.is_settled())
                        .await
                        .map_err(|_| FormError::check_abandoned(value))?;
                }
            }
        }
    }

    fn publish_edit(&self, value: &str, status: CheckStatus) -> u64 {
        let mut seq = 0;
        self.state.send_modify(|s| {
            s.seq += 1;
            s.value = value.to_string();
            s.status = status;
            seq = s.seq;
        });
        seq
    }
}

fn mark_in_flight(state: &watch::Sender<CheckSnapshot>, seq: u64) -> bool {
    state.send_if_modified(|s| {
        if s.seq == seq && s.status == CheckStatus::Scheduled {
            s.status = CheckStatus::InFlight;
            true
        } else {
            false
        }
    })
}

async fn run_check(
    checker: &dyn PayeeAccountChecker,
    state: &watch::Sender<CheckSnapshot>,
    seq: u64,
    value: &str,
) -> CheckStatus {
    let status = match checker.check(value).await {
        Ok(true) => CheckStatus::Valid,
        Ok(false) => CheckStatus::Invalid,
        Err(e) => {
            warn!(account = value, error = %e, "payee account check failed");
            CheckStatus::Fault
        }
    };

    let applied = state.send_if_modified(|s| {
        if s.seq == seq {
            s.status = status;
            true
        } else {
            false
        }
    });
    if !applied {
        debug!(seq, ?status, "discarding stale payee account check result");
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Checker with per-account latency and answers; unknown accounts are invalid
    #[derive(Default)]
    struct ScriptedChecker {
        responses: HashMap<String, (Duration, Result<bool, FormError>)>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedChecker {
        fn respond(mut self, account: &str, delay_ms: u64, result: Result<bool, FormError>) -> Self {
            self.responses
                .insert(account.to_string(), (Duration::from_millis(delay_ms), result));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PayeeAccountChecker for ScriptedChecker {
        async fn check(&self, account: &str) -> Result<bool, FormError> {
            self.calls.lock().unwrap().push(account.to_string());
            let (delay, result) = self
                .responses
                .get(account)
                .cloned()
                .unwrap_or((Duration::ZERO, Ok(false)));
            tokio::time::sleep(delay).await;
            result
        }
    }

    fn validator(checker: &Arc<ScriptedChecker>) -> PayeeAccountValidator {
        PayeeAccountValidator::new(checker.clone(), Duration::from_millis(300))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_issues_one_check_for_final_value() {
        let checker = Arc::new(ScriptedChecker::default().respond("LT123", 0, Ok(true)));
        let validator = validator(&checker);

        validator.schedule("L");
        tokio::time::advance(Duration::from_millis(100)).await;
        validator.schedule("LT1");
        tokio::time::advance(Duration::from_millis(100)).await;
        validator.schedule("LT123");

        let snapshot = validator.settled().await.unwrap();
        assert_eq!(snapshot.value, "LT123");
        assert_eq!(snapshot.status, CheckStatus::Valid);

        // Let every earlier timer fire
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(checker.calls(), vec!["LT123".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_result_for_superseded_value_is_discarded() {
        let checker = Arc::new(
            ScriptedChecker::default()
                .respond("A", 1_000, Ok(false))
                .respond("B", 10, Ok(true)),
        );
        let validator = validator(&checker);
        let mut rx = validator.subscribe();

        validator.schedule("A");
        rx.wait_for(|s| s.status == CheckStatus::InFlight)
            .await
            .unwrap();

        validator.schedule("B");
        let snapshot = validator.settled().await.unwrap();
        assert_eq!(snapshot.value, "B");
        assert_eq!(snapshot.status, CheckStatus::Valid);

        // A's response arrives now and must not be applied
        tokio::time::sleep(Duration::from_secs(2)).await;
        let snapshot = validator.snapshot();
        assert_eq!(snapshot.value, "B");
        assert_eq!(snapshot.status, CheckStatus::Valid);
        assert_eq!(checker.calls(), vec!["A".to_string(), "B".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_field_cancels_pending_check() {
        let checker = Arc::new(ScriptedChecker::default().respond("A", 0, Ok(true)));
        let validator = validator(&checker);

        validator.schedule("A");
        assert_eq!(validator.schedule(""), CheckStatus::Idle);
        assert_eq!(validator.snapshot().status, CheckStatus::Idle);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(checker.calls().is_empty());
        assert_eq!(validator.snapshot().status, CheckStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_only_value_never_reaches_network() {
        let checker = Arc::new(ScriptedChecker::default());
        let validator = validator(&checker);

        assert_eq!(validator.schedule("   "), CheckStatus::Idle);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(checker.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_forces_check_inside_window() {
        let checker = Arc::new(ScriptedChecker::default().respond("A", 0, Ok(true)));
        let validator = validator(&checker);
        let started = tokio::time::Instant::now();

        validator.schedule("A");
        let status = validator.resolve("A").await.unwrap();

        assert_eq!(status, CheckStatus::Valid);
        assert!(started.elapsed() < validator.window());

        // The original timer wakes up stale and stays quiet
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(checker.calls(), vec!["A".to_string()]);
        assert_eq!(validator.snapshot().status, CheckStatus::Valid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_waits_for_request_in_flight() {
        let checker = Arc::new(ScriptedChecker::default().respond("A", 500, Ok(true)));
        let validator = validator(&checker);
        let mut rx = validator.subscribe();

        validator.schedule("A");
        rx.wait_for(|s| s.status == CheckStatus::InFlight)
            .await
            .unwrap();

        assert_eq!(validator.resolve("A").await.unwrap(), CheckStatus::Valid);
        assert_eq!(checker.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_reuses_settled_answer() {
        let checker = Arc::new(ScriptedChecker::default().respond("A", 0, Ok(false)));
        let validator = validator(&checker);

        validator.schedule("A");
        validator.settled().await.unwrap();

        assert_eq!(validator.resolve("A").await.unwrap(), CheckStatus::Invalid);
        assert_eq!(checker.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checker_fault_maps_to_fault_status() {
        let checker = Arc::new(ScriptedChecker::default().respond(
            "A",
            0,
            Err(FormError::check_failed("A", "HTTP status 503")),
        ));
        let validator = validator(&checker);

        validator.schedule("A");
        assert_eq!(validator.settled().await.unwrap().status, CheckStatus::Fault);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_keeps_settled_answer() {
        let checker = Arc::new(ScriptedChecker::default().respond("A", 0, Ok(true)));
        let validator = validator(&checker);

        validator.schedule("A");
        let settled = validator.settled().await.unwrap();

        assert_eq!(validator.schedule(" A "), CheckStatus::Valid);
        assert_eq!(validator.snapshot(), settled);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(checker.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_retries_after_fault() {
        let checker = Arc::new(ScriptedChecker::default().respond(
            "A",
            0,
            Err(FormError::check_failed("A", "connection reset")),
        ));
        let validator = validator(&checker);

        validator.schedule("A");
        assert_eq!(validator.settled().await.unwrap().status, CheckStatus::Fault);

        assert_eq!(validator.schedule("A"), CheckStatus::Scheduled);
        validator.settled().await.unwrap();
        assert_eq!(checker.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_resolve_leaves_forced_check_running() {
        let checker = Arc::new(ScriptedChecker::default().respond("A", 5_000, Ok(true)));
        let validator = validator(&checker);

        validator.schedule("A");
        let result =
            tokio::time::timeout(Duration::from_millis(100), validator.resolve("A")).await;
        assert!(result.is_err());
        assert_eq!(validator.snapshot().status, CheckStatus::InFlight);

        assert_eq!(validator.resolve("A").await.unwrap(), CheckStatus::Valid);
        assert_eq!(checker.calls().len(), 1);
    }

    #[test]
    fn test_schedule_without_runtime_defers_until_resolve() {
        let checker = Arc::new(ScriptedChecker::default().respond("A", 0, Ok(true)));
        let validator = validator(&checker);

        assert_eq!(validator.schedule("A"), CheckStatus::Scheduled);
        assert!(checker.calls().is_empty());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let status = runtime.block_on(validator.resolve("A")).unwrap();
        assert_eq!(status, CheckStatus::Valid);
    }
}
