/// A step in a saga that can be executed and compensated.
///
/// The forward action receives only the shared execution context and
/// produces an output. That output is held by the coordinator and handed
/// back to [`compensate`](SagaStep::compensate) if the saga has to roll back.
///
/// # Type Parameters
///
/// - `Output`: Data produced by the action and consumed by the compensation
/// - `Context`: Shared dependencies for the whole run (the same for every step)
/// - `Error`: The error type for step and compensation failures
pub trait SagaStep: Send + Sync {
    /// Data produced by `execute()` and kept for compensation.
    type Output;

    /// Execution context shared by every step of the saga.
    type Context;

    /// Error type for step failures.
    type Error;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> &str;

    /// Execute the forward action.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails. The saga then stops and rolls back.
    fn execute(&self, ctx: &Self::Context) -> Result<Self::Output, Self::Error>;

    /// Compensate (undo) the step's effects.
    ///
    /// Receives the output `execute()` produced. A step whose own action
    /// failed is compensated too, with `output` set to `None`, so partial
    /// effects can be cleaned up.
    ///
    /// The default implementation is a no-op, suitable for read-only steps.
    ///
    /// # Errors
    ///
    /// Returns an error if compensation fails. This is unrecoverable for the
    /// whole saga.
    fn compensate(
        &self,
        ctx: &Self::Context,
        output: Option<Self::Output>,
    ) -> Result<(), Self::Error> {
        let _ = (ctx, output);
        Ok(())
    }

    /// Human-readable description of what compensation will do.
    fn compensation_description(&self) -> String {
        format!("undo {}", self.name())
    }
}
