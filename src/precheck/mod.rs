//! Named, retryable installer pre-checks.
//!
//! A [`PreCheckTask`] owns one [`PreCheck`] and walks
//! `NotRun -> Running -> {Succeeded, Failed}`. A failed task runs again only
//! when the caller asks for it, either directly or through the
//! [`RetryAction`] attached to the error outcome.

use crate::error::{LocatorError, Result};
use async_trait::async_trait;

pub(crate) mod installed;

/// Label used by the built-in checks for their retry action.
pub const RETRY_LABEL: &str = "Retry";

/// The check operation behind a task.
///
/// Expected failures (missing install, missing file) are returned as
/// [`PreCheckOutcome::Error`]. `Err` is for faults the check cannot describe
/// to the user.
#[async_trait]
pub trait PreCheck: Send + Sync {
    /// Run the check once.
    async fn check(&self) -> Result<PreCheckOutcome>;
}

/// A user-invokable retry, returned with an error outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryAction {
    label: String,
}

impl RetryAction {
    /// Action shown to the user as `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Button/prompt text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Re-evaluate `task`.
    pub async fn invoke<'t>(&self, task: &'t mut PreCheckTask) -> Result<&'t PreCheckOutcome> {
        tracing::debug!(task = task.name(), action = %self.label, "retry requested");
        task.request_reevaluation().await
    }
}

/// Result of one check execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreCheckOutcome {
    /// The check passed.
    Success {
        /// Message for the user.
        message: String,
    },
    /// The check failed.
    Error {
        /// Message for the user.
        message: String,
        /// Offered retry, if re-running could change the result.
        retry: Option<RetryAction>,
    },
}

impl PreCheckOutcome {
    /// Passing outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    /// Failing outcome without a retry.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            retry: None,
        }
    }

    /// Failing outcome offering a retry labelled `label`.
    pub fn error_with_retry(message: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            retry: Some(RetryAction::new(label)),
        }
    }

    /// True for [`PreCheckOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// User-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message } | Self::Error { message, .. } => message,
        }
    }

    /// Retry offered by a failing outcome.
    pub fn retry(&self) -> Option<&RetryAction> {
        match self {
            Self::Success { .. } => None,
            Self::Error { retry, .. } => retry.as_ref(),
        }
    }
}

/// Lifecycle of a [`PreCheckTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Never evaluated.
    NotRun,
    /// Check in flight.
    Running,
    /// Last evaluation passed.
    Succeeded,
    /// Last evaluation failed or faulted.
    Failed,
}

/// A named check with its latest outcome.
pub struct PreCheckTask {
    name: String,
    required: bool,
    check: Box<dyn PreCheck>,
    state: TaskState,
    outcome: Option<PreCheckOutcome>,
}

impl std::fmt::Debug for PreCheckTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreCheckTask")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("state", &self.state)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl PreCheckTask {
    /// Create a task. `required` tells the installer whether it may proceed when this check fails.
    pub fn new(name: impl Into<String>, required: bool, check: impl PreCheck + 'static) -> Self {
        Self {
            name: name.into(),
            required,
            check: Box::new(check),
            state: TaskState::NotRun,
            outcome: None,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a failure blocks the install.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Current state.
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Outcome of the latest completed evaluation (`None` before the first one or after a fault).
    pub fn outcome(&self) -> Option<&PreCheckOutcome> {
        self.outcome.as_ref()
    }

    /// True when this task is required and has not succeeded.
    pub fn blocks_install(&self) -> bool {
        self.required && self.state != TaskState::Succeeded
    }

    /// First evaluation. Only valid from [`TaskState::NotRun`].
    pub async fn run(&mut self) -> Result<&PreCheckOutcome> {
        self.evaluate_from(TaskState::NotRun).await
    }

    /// Run the check again. Only valid from [`TaskState::Failed`].
    pub async fn request_reevaluation(&mut self) -> Result<&PreCheckOutcome> {
        self.evaluate_from(TaskState::Failed).await
    }

    async fn evaluate_from(&mut self, expected: TaskState) -> Result<&PreCheckOutcome> {
        if self.state != expected {
            return Err(LocatorError::InvalidTransition {
                task: self.name.clone(),
                from: self.state,
            });
        }

        self.state = TaskState::Running;
        self.outcome = None;
        tracing::debug!(task = %self.name, "running pre-check");

        let result = {
            let guard = RunningGuard {
                state: &mut self.state,
            };
            let result = self.check.check().await;
            *guard.state = match &result {
                Ok(o) if o.is_success() => TaskState::Succeeded,
                _ => TaskState::Failed,
            };
            result
        };

        let outcome = match result {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!(task = %self.name, error = %e, "pre-check faulted");
                return Err(e);
            }
        };
        tracing::info!(
            task = %self.name,
            state = ?self.state,
            message = outcome.message(),
            "pre-check finished"
        );

        Ok(self.outcome.insert(outcome))
    }
}

/// Moves a task out of `Running` if its evaluation future is dropped mid-check.
struct RunningGuard<'a> {
    state: &'a mut TaskState,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if *self.state == TaskState::Running {
            *self.state = TaskState::Failed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Fails until it has been called `pass_on` times.
    struct Flaky {
        calls: Arc<AtomicUsize>,
        pass_on: usize,
    }

    #[async_trait]
    impl PreCheck for Flaky {
        async fn check(&self) -> Result<PreCheckOutcome> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= self.pass_on {
                Ok(PreCheckOutcome::success(format!("ok after {n}")))
            } else {
                Ok(PreCheckOutcome::error_with_retry("not yet", RETRY_LABEL))
            }
        }
    }

    struct Faulty;

    #[async_trait]
    impl PreCheck for Faulty {
        async fn check(&self) -> Result<PreCheckOutcome> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    /// Hangs on the first call, passes immediately afterwards.
    struct SlowFirst {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PreCheck for SlowFirst {
        async fn check(&self) -> Result<PreCheckOutcome> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(PreCheckOutcome::success("done"))
        }
    }

    fn flaky(pass_on: usize) -> (PreCheckTask, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let task = PreCheckTask::new(
            "Flaky",
            true,
            Flaky {
                calls: calls.clone(),
                pass_on,
            },
        );
        (task, calls)
    }

    #[tokio::test]
    async fn retry_action_reruns_same_task() {
        let (mut task, calls) = flaky(2);
        assert_eq!(task.state(), TaskState::NotRun);
        assert!(task.blocks_install());

        let retry = task.run().await.unwrap().retry().cloned().unwrap();
        assert_eq!(task.state(), TaskState::Failed);
        assert_eq!(retry.label(), "Retry");

        let outcome = retry.invoke(&mut task).await.unwrap();
        assert_eq!(outcome.message(), "ok after 2");
        assert_eq!(task.state(), TaskState::Succeeded);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!task.blocks_install());
    }

    #[tokio::test]
    async fn run_is_only_valid_once() {
        let (mut task, _) = flaky(1);
        task.run().await.unwrap();
        assert!(matches!(
            task.run().await,
            Err(LocatorError::InvalidTransition {
                from: TaskState::Succeeded,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn succeeded_task_rejects_reevaluation() {
        let (mut task, calls) = flaky(1);
        task.run().await.unwrap();
        assert!(task.request_reevaluation().await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_run_task_cannot_be_reevaluated() {
        let (mut task, calls) = flaky(1);
        assert!(task.request_reevaluation().await.is_err());
        assert_eq!(task.state(), TaskState::NotRun);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fault_leaves_task_failed_without_outcome() {
        let mut task = PreCheckTask::new("Faulty", false, Faulty);
        assert!(task.run().await.is_err());
        assert_eq!(task.state(), TaskState::Failed);
        assert!(task.outcome().is_none());
        assert!(!task.blocks_install());

        assert!(task.request_reevaluation().await.is_err());
        assert_eq!(task.state(), TaskState::Failed);
    }

    #[tokio::test]
    async fn abandoned_evaluation_can_be_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut task = PreCheckTask::new(
            "Slow",
            true,
            SlowFirst {
                calls: calls.clone(),
            },
        );

        let timed_out = tokio::time::timeout(Duration::from_millis(10), task.run()).await;
        assert!(timed_out.is_err());
        assert_eq!(task.state(), TaskState::Failed);
        assert!(task.outcome().is_none());

        let outcome = task.request_reevaluation().await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(task.state(), TaskState::Succeeded);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
