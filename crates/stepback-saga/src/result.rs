use std::fmt::Debug;

use stepback_log::ExecutionId;

use crate::error::StepFailed;

/// Terminal outcome of one saga run that did not escalate.
///
/// Either every step succeeded, or a step failed and every compensation
/// succeeded. In the latter case the original step error is kept; a
/// compensation error never ends up here.
#[derive(Debug)]
#[must_use]
pub struct SagaResult<E: Debug> {
    execution_id: ExecutionId,
    failure: Option<StepFailed<E>>,
}

impl<E: Debug> SagaResult<E> {
    pub(crate) fn new(execution_id: ExecutionId, failure: Option<StepFailed<E>>) -> Self {
        Self {
            execution_id,
            failure,
        }
    }

    #[must_use]
    pub fn execution_id(&self) -> &ExecutionId {
        &self.execution_id
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// The failed step, if the saga was rolled back.
    #[must_use]
    pub fn failure(&self) -> Option<&StepFailed<E>> {
        self.failure.as_ref()
    }

    /// The error returned by the failed step's action.
    #[must_use]
    pub fn error(&self) -> Option<&E> {
        self.failure.as_ref().map(|failure| &failure.source)
    }

    /// Convert into a plain `Result`.
    ///
    /// # Errors
    ///
    /// Returns the step failure if the saga was rolled back.
    pub fn into_result(self) -> Result<(), StepFailed<E>> {
        match self.failure {
            None => Ok(()),
            Some(failure) => Err(failure),
        }
    }
}
