use std::fmt::Debug;

use stepback_log::{EventKind, LogStoreError};
use thiserror::Error;

/// A forward action failed and the saga was rolled back.
#[derive(Debug, Error)]
#[error("step '{step}' failed")]
pub struct StepFailed<E: Debug> {
    /// Name of the step that failed.
    pub step: String,
    /// Position of the step in the saga.
    pub index: usize,
    /// The error returned by the step's action.
    #[source]
    pub source: E,
}

/// A condition the coordinator cannot recover from.
///
/// Returned instead of a [`SagaResult`](crate::SagaResult) when a
/// compensation fails or the audit log rejects an event. External state may
/// be inconsistent; the caller decides how to escalate (exit, alert, page),
/// but must not treat this as an ordinary saga failure.
#[derive(Debug, Error)]
#[non_exhaustive]
#[must_use = "an unrecoverable saga error leaves external state inconsistent"]
pub enum Unrecoverable<E: Debug> {
    /// A compensation failed while rolling back a failed step.
    #[error(
        "compensation failed for step '{step}' while rolling back '{}'; remaining steps were not compensated",
        .failure.step
    )]
    CompensationFailed {
        /// Name of the step whose compensation failed.
        step: String,
        /// Position of that step in the saga.
        index: usize,
        /// Description of what the compensation was trying to do.
        description: String,
        /// The error returned by the compensation.
        #[source]
        source: E,
        /// The forward failure that started the rollback.
        failure: StepFailed<E>,
    },

    /// An event could not be appended to the saga log.
    #[error("failed to record '{kind}' in the saga log")]
    LogAppend {
        /// Kind of the event that was lost.
        kind: EventKind,
        /// Step the event referred to, if any.
        step_index: Option<usize>,
        /// The storage fault.
        #[source]
        source: LogStoreError,
        /// The forward failure being rolled back, if the fault hit during
        /// compensation.
        failure: Option<StepFailed<E>>,
    },
}

impl<E: Debug> Unrecoverable<E> {
    /// The forward failure being rolled back when this happened, if known.
    #[must_use]
    pub fn failure(&self) -> Option<&StepFailed<E>> {
        match self {
            Self::CompensationFailed { failure, .. } => Some(failure),
            Self::LogAppend { failure, .. } => failure.as_ref(),
        }
    }

    /// Attach the forward failure to a log fault raised mid-rollback.
    pub(crate) fn during_rollback(self, rolled_back: StepFailed<E>) -> Self {
        match self {
            Self::LogAppend {
                kind,
                step_index,
                source,
                failure: None,
            } => Self::LogAppend {
                kind,
                step_index,
                source,
                failure: Some(rolled_back),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct TestError(&'static str);

    #[test]
    fn step_failed_names_step_and_keeps_source() {
        let err = StepFailed {
            step: "charge".to_string(),
            index: 1,
            source: TestError("card declined"),
        };

        assert_eq!(err.to_string(), "step 'charge' failed");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("card declined"));
    }

    #[test]
    fn compensation_failed_mentions_both_steps() {
        let err = Unrecoverable::CompensationFailed {
            step: "reserve".to_string(),
            index: 0,
            description: "undo reserve".to_string(),
            source: TestError("release refused"),
            failure: StepFailed {
                step: "charge".to_string(),
                index: 1,
                source: TestError("card declined"),
            },
        };

        let msg = err.to_string();
        assert!(msg.contains("'reserve'"));
        assert!(msg.contains("'charge'"));
        assert_eq!(err.failure().map(|f| f.index), Some(1));
    }

    #[test]
    fn log_append_has_no_failure() {
        let err: Unrecoverable<TestError> = Unrecoverable::LogAppend {
            kind: EventKind::SagaStarted,
            step_index: None,
            source: LogStoreError::Poisoned,
            failure: None,
        };

        assert!(err.to_string().contains("saga_started"));
        assert!(err.failure().is_none());
    }

    #[test]
    fn log_append_during_rollback_keeps_failure() {
        let err: Unrecoverable<TestError> = Unrecoverable::LogAppend {
            kind: EventKind::StepCompensating,
            step_index: Some(0),
            source: LogStoreError::Poisoned,
            failure: None,
        };

        let err = err.during_rollback(StepFailed {
            step: "charge".to_string(),
            index: 1,
            source: TestError("card declined"),
        });

        let failure = err.failure().expect("failure should be attached");
        assert_eq!(failure.step, "charge");
        assert_eq!(failure.source.0, "card declined");
    }
}
