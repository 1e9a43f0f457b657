use crate::erased::{ErasedStep, StepWrapper};
use crate::saga::Saga;
use crate::step::SagaStep;

/// Builder for constructing type-safe sagas.
///
/// The builder enforces at compile-time that every step shares the saga's
/// context and error types, so a step can never be handed the wrong
/// execution context at run time:
///
/// ```compile_fail
/// use stepback_saga::{Saga, SagaBuilder, SagaStep};
///
/// struct Ledger;
/// struct Mailer;
///
/// struct SendReceipt;
/// impl SagaStep for SendReceipt {
///     type Output = ();
///     type Context = Mailer;  // Expects a Mailer...
///     type Error = ();
///     fn name(&self) -> &str { "send_receipt" }
///     fn execute(&self, _: &Mailer) -> Result<(), ()> { Ok(()) }
/// }
///
/// // ...but the saga runs against a Ledger: compile error.
/// let saga: Saga<Ledger, ()> = SagaBuilder::new("checkout")
///     .step(SendReceipt)
///     .build();
/// ```
///
/// Only steps can be registered; arbitrary values cannot:
///
/// ```compile_fail
/// use stepback_saga::SagaBuilder;
///
/// let saga = SagaBuilder::<(), ()>::new("checkout").step(42_u32).build();
/// ```
///
/// An empty saga is valid and completes immediately:
///
/// ```
/// use stepback_saga::SagaBuilder;
///
/// let saga = SagaBuilder::<(), String>::new("noop").build();
/// assert!(saga.is_empty());
/// ```
pub struct SagaBuilder<Ctx, Err> {
    name: String,
    steps: Vec<Box<dyn ErasedStep<Ctx, Err>>>,
}

impl<Ctx, Err> SagaBuilder<Ctx, Err> {
    /// Create a new saga builder with no steps.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step. Steps run in the order they are added.
    #[must_use]
    pub fn step<S>(mut self, step: S) -> Self
    where
        S: SagaStep<Context = Ctx, Error = Err> + 'static,
    {
        self.steps.push(Box::new(StepWrapper::new(step)));
        self
    }

    /// Build the saga from the accumulated steps.
    #[must_use]
    pub fn build(self) -> Saga<Ctx, Err> {
        Saga::from_steps(self.name, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fn_step::step_fn;

    struct TestContext;

    #[derive(Debug, PartialEq)]
    struct TestError(String);

    struct Reserve;

    impl SagaStep for Reserve {
        type Output = u32;
        type Context = TestContext;
        type Error = TestError;

        fn name(&self) -> &str {
            "reserve"
        }

        fn execute(&self, _ctx: &Self::Context) -> Result<Self::Output, Self::Error> {
            Ok(1)
        }
    }

    struct Notify;

    impl SagaStep for Notify {
        type Output = ();
        type Context = TestContext;
        type Error = TestError;

        fn name(&self) -> &str {
            "notify"
        }

        fn execute(&self, _ctx: &Self::Context) -> Result<Self::Output, Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn builder_creates_empty_saga() {
        let saga: Saga<TestContext, TestError> = SagaBuilder::new("empty").build();

        assert_eq!(saga.name(), "empty");
        assert!(saga.is_empty());
    }

    #[test]
    fn builder_keeps_steps_in_order() {
        let saga: Saga<TestContext, TestError> = SagaBuilder::new("order")
            .step(Reserve)
            .step(Notify)
            .step(Reserve)
            .build();

        assert_eq!(saga.len(), 3);
        assert_eq!(
            saga.step_names().collect::<Vec<_>>(),
            vec!["reserve", "notify", "reserve"]
        );
    }

    #[test]
    fn builder_mixes_trait_and_closure_steps() {
        let saga: Saga<TestContext, TestError> = SagaBuilder::new("mixed")
            .step(Reserve)
            .step(step_fn(
                "audit",
                |_: &TestContext| Ok("entry".to_string()),
                |_: &TestContext, _: Option<String>| Ok(()),
            ))
            .build();

        assert_eq!(saga.step_names().collect::<Vec<_>>(), vec!["reserve", "audit"]);
    }
}
