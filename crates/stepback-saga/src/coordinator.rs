use std::fmt::Debug;

use stepback_log::{EventKind, ExecutionId, LogEvent, LogStore};
use tracing::{debug, error, info, warn};

use crate::erased::{BoundCompensation, ErasedStep};
use crate::error::{StepFailed, Unrecoverable};
use crate::result::SagaResult;
use crate::saga::Saga;

/// Drives one execution of a [`Saga`].
///
/// The coordinator runs every step in order against the execution context
/// and appends a [`LogEvent`] to the log store before each transition. When
/// a step fails, forward progress stops and every started step, including
/// the failing one, is compensated in reverse order. A coordinator is
/// consumed by [`play`](Self::play); create a new one for every run.
pub struct ExecutionCoordinator<'a, Ctx, Err, L> {
    execution_id: ExecutionId,
    saga: &'a Saga<Ctx, Err>,
    log_store: L,
    ctx: &'a Ctx,
    compensations: Vec<Box<dyn BoundCompensation<Ctx, Err> + 'a>>,
}

impl<'a, Ctx, Err, L> ExecutionCoordinator<'a, Ctx, Err, L>
where
    Err: Debug,
    L: LogStore,
{
    /// Bind a coordinator to a saga, a log store and an execution context.
    ///
    /// The execution id is generated; use
    /// [`with_execution_id`](Self::with_execution_id) to supply one.
    #[must_use]
    pub fn new(saga: &'a Saga<Ctx, Err>, log_store: L, ctx: &'a Ctx) -> Self {
        Self {
            execution_id: ExecutionId::generate(),
            saga,
            log_store,
            ctx,
            compensations: Vec::with_capacity(saga.len()),
        }
    }

    #[must_use]
    pub fn with_execution_id(mut self, execution_id: impl Into<ExecutionId>) -> Self {
        self.execution_id = execution_id.into();
        self
    }

    #[must_use]
    pub fn execution_id(&self) -> &ExecutionId {
        &self.execution_id
    }

    /// Play the saga to completion.
    ///
    /// Returns `Ok` when every step succeeded, or when a step failed and all
    /// compensations succeeded; the [`SagaResult`] then carries the failing
    /// step's original error.
    ///
    /// # Errors
    ///
    /// Returns [`Unrecoverable::CompensationFailed`] if a compensation fails
    /// (remaining compensations are not attempted), and
    /// [`Unrecoverable::LogAppend`] if the log store rejects an event (the
    /// run stops at that point). A log fault during rollback still carries
    /// the forward failure.
    pub fn play(mut self) -> Result<SagaResult<Err>, Unrecoverable<Err>> {
        let saga = self.saga;
        info!(
            execution_id = %self.execution_id,
            saga = saga.name(),
            steps = saga.len(),
            "starting saga"
        );
        self.record(self.event(EventKind::SagaStarted))?;

        let mut failure = None;
        for (index, step) in saga.steps().iter().enumerate() {
            if let Some(error) = self.execute_step(index, step.as_ref())? {
                failure = Some(StepFailed {
                    step: step.name().to_string(),
                    index,
                    source: error,
                });
                break;
            }
        }

        if let Some(step_failure) = failure.take() {
            failure = Some(self.abort(step_failure)?);
        }

        self.record(self.event(EventKind::SagaCompleted))?;
        match &failure {
            None => info!(execution_id = %self.execution_id, saga = saga.name(), "saga completed"),
            Some(step_failure) => warn!(
                execution_id = %self.execution_id,
                saga = saga.name(),
                step = %step_failure.step,
                error = ?step_failure.source,
                "saga rolled back"
            ),
        }

        Ok(SagaResult::new(self.execution_id, failure))
    }

    /// Run one forward action, returning its error if it failed.
    fn execute_step(
        &mut self,
        index: usize,
        step: &'a dyn ErasedStep<Ctx, Err>,
    ) -> Result<Option<Err>, Unrecoverable<Err>> {
        self.record(
            self.event(EventKind::StepStarted)
                .with_step(index, step.name()),
        )?;
        debug!(execution_id = %self.execution_id, index, step = step.name(), "executing step");

        let executed = step.execute_erased(self.ctx);
        self.compensations.push(executed.compensation);

        if let Some(error) = &executed.error {
            warn!(
                execution_id = %self.execution_id,
                index,
                step = step.name(),
                error = ?error,
                "step failed"
            );
        }
        Ok(executed.error)
    }

    /// Compensate every started step in reverse order.
    ///
    /// Hands the forward failure back once rollback is complete.
    fn abort(&mut self, failure: StepFailed<Err>) -> Result<StepFailed<Err>, Unrecoverable<Err>> {
        let steps_to_compensate = self.compensations.len();
        if let Err(err) = self.record(
            self.event(EventKind::SagaAborted)
                .with_step(failure.index, &failure.step)
                .with_steps_to_compensate(steps_to_compensate),
        ) {
            return Err(err.during_rollback(failure));
        }
        info!(
            execution_id = %self.execution_id,
            failed_step = %failure.step,
            steps_to_compensate,
            "aborting saga"
        );

        let saga = self.saga;
        let steps = saga.steps();
        while let Some(compensation) = self.compensations.pop() {
            let index = self.compensations.len();
            let step = steps[index].as_ref();

            if let Err(err) = self.record(
                self.event(EventKind::StepCompensating)
                    .with_step(index, step.name()),
            ) {
                return Err(err.during_rollback(failure));
            }
            debug!(
                execution_id = %self.execution_id,
                index,
                step = step.name(),
                description = %step.compensation_description(),
                "compensating step"
            );

            if let Err(source) = compensation.compensate(self.ctx) {
                error!(
                    execution_id = %self.execution_id,
                    index,
                    step = step.name(),
                    error = ?source,
                    remaining = index,
                    "compensation failed; saga state is inconsistent"
                );
                return Err(Unrecoverable::CompensationFailed {
                    step: step.name().to_string(),
                    index,
                    description: step.compensation_description(),
                    source,
                    failure,
                });
            }
        }

        Ok(failure)
    }

    fn event(&self, kind: EventKind) -> LogEvent {
        LogEvent::new(&self.execution_id, self.saga.name(), kind)
    }

    fn record(&self, event: LogEvent) -> Result<(), Unrecoverable<Err>> {
        self.log_store.append(&event).map_err(|source| {
            error!(
                execution_id = %self.execution_id,
                kind = %event.kind,
                error = %source,
                "failed to append saga log event"
            );
            Unrecoverable::LogAppend {
                kind: event.kind,
                step_index: event.step_index,
                source,
                failure: None,
            }
        })
    }
}
