use std::fmt::Debug;

use stepback_log::LogStore;

use crate::coordinator::ExecutionCoordinator;
use crate::erased::ErasedStep;
use crate::error::Unrecoverable;
use crate::result::SagaResult;

/// An immutable, ordered sequence of steps ready for execution.
///
/// Steps run in order; if one fails, every step that was started is
/// compensated in reverse order (LIFO). A saga holds no run state, so one
/// value can be played any number of times, including from several threads
/// at once.
pub struct Saga<Ctx, Err> {
    name: String,
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
}

impl<Ctx, Err> Saga<Ctx, Err> {
    pub(crate) fn from_steps(name: String, steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>) -> Self {
        Self { name, steps }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.name())
    }

    pub(crate) fn steps(&self) -> &[Box<dyn ErasedStep<Ctx, Err>>] {
        &self.steps
    }
}

impl<Ctx, Err: Debug> Saga<Ctx, Err> {
    /// Play the saga once under a freshly generated execution id.
    ///
    /// Shorthand for [`ExecutionCoordinator::new`] followed by
    /// [`ExecutionCoordinator::play`].
    ///
    /// # Errors
    ///
    /// Returns [`Unrecoverable`] if a compensation fails or the log store
    /// rejects an event.
    pub fn play<L: LogStore>(
        &self,
        ctx: &Ctx,
        log_store: L,
    ) -> Result<SagaResult<Err>, Unrecoverable<Err>> {
        ExecutionCoordinator::new(self, log_store, ctx).play()
    }
}

impl<Ctx, Err> Debug for Saga<Ctx, Err> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Saga")
            .field("name", &self.name)
            .field("steps", &self.step_names().collect::<Vec<_>>())
            .finish()
    }
}
