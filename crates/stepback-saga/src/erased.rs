use crate::step::SagaStep;

/// Object-safe view of a [`SagaStep`] sharing the saga's context and error.
pub(crate) trait ErasedStep<Ctx, Err>: Send + Sync {
    fn name(&self) -> &str;

    fn compensation_description(&self) -> String;

    /// Run the action and bind the step's compensation to whatever it produced.
    fn execute_erased<'s>(&'s self, ctx: &Ctx) -> Executed<'s, Ctx, Err>;
}

/// Outcome of one forward action.
///
/// The compensation is always present, even when the action failed.
pub(crate) struct Executed<'s, Ctx, Err> {
    pub(crate) compensation: Box<dyn BoundCompensation<Ctx, Err> + 's>,
    pub(crate) error: Option<Err>,
}

/// A step's compensation together with the output of its action.
pub(crate) trait BoundCompensation<Ctx, Err> {
    fn compensate(self: Box<Self>, ctx: &Ctx) -> Result<(), Err>;
}

struct CapturedOutput<'s, S: SagaStep> {
    step: &'s S,
    output: Option<S::Output>,
}

impl<S: SagaStep> BoundCompensation<S::Context, S::Error> for CapturedOutput<'_, S> {
    fn compensate(self: Box<Self>, ctx: &S::Context) -> Result<(), S::Error> {
        let Self { step, output } = *self;
        step.compensate(ctx, output)
    }
}

pub(crate) struct StepWrapper<S> {
    step: S,
}

impl<S> StepWrapper<S> {
    pub(crate) fn new(step: S) -> Self {
        Self { step }
    }
}

impl<S> ErasedStep<S::Context, S::Error> for StepWrapper<S>
where
    S: SagaStep,
{
    fn name(&self) -> &str {
        self.step.name()
    }

    fn compensation_description(&self) -> String {
        self.step.compensation_description()
    }

    fn execute_erased<'s>(&'s self, ctx: &S::Context) -> Executed<'s, S::Context, S::Error> {
        let (output, error) = match self.step.execute(ctx) {
            Ok(output) => (Some(output), None),
            Err(error) => (None, Some(error)),
        };

        Executed {
            compensation: Box::new(CapturedOutput {
                step: &self.step,
                output,
            }),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct TestContext {
        multiplier: i32,
        compensated: RefCell<Vec<Option<i32>>>,
    }

    impl TestContext {
        fn new(multiplier: i32) -> Self {
            Self {
                multiplier,
                compensated: RefCell::new(Vec::new()),
            }
        }
    }

    #[derive(Debug, PartialEq)]
    struct TestError(String);

    struct MultiplyStep;

    impl SagaStep for MultiplyStep {
        type Output = i32;
        type Context = TestContext;
        type Error = TestError;

        fn name(&self) -> &str {
            "multiply"
        }

        fn execute(&self, ctx: &Self::Context) -> Result<Self::Output, Self::Error> {
            Ok(6 * ctx.multiplier)
        }

        fn compensate(
            &self,
            ctx: &Self::Context,
            output: Option<Self::Output>,
        ) -> Result<(), Self::Error> {
            ctx.compensated.borrow_mut().push(output);
            Ok(())
        }
    }

    struct FailingStep;

    impl SagaStep for FailingStep {
        type Output = i32;
        type Context = TestContext;
        type Error = TestError;

        fn name(&self) -> &str {
            "failing"
        }

        fn execute(&self, _ctx: &Self::Context) -> Result<Self::Output, Self::Error> {
            Err(TestError("boom".to_string()))
        }

        fn compensate(
            &self,
            ctx: &Self::Context,
            output: Option<Self::Output>,
        ) -> Result<(), Self::Error> {
            ctx.compensated.borrow_mut().push(output);
            Ok(())
        }
    }

    #[test]
    fn wrapper_delegates_name() {
        let wrapper = StepWrapper::new(MultiplyStep);
        assert_eq!(wrapper.name(), "multiply");
    }

    #[test]
    fn wrapper_returns_compensation_description() {
        let wrapper = StepWrapper::new(MultiplyStep);
        assert_eq!(wrapper.compensation_description(), "undo multiply");
    }

    #[test]
    fn bound_compensation_receives_action_output() {
        let ctx = TestContext::new(7);
        let wrapper = StepWrapper::new(MultiplyStep);

        let executed = wrapper.execute_erased(&ctx);

        assert!(executed.error.is_none());
        assert!(executed.compensation.compensate(&ctx).is_ok());
        assert_eq!(*ctx.compensated.borrow(), vec![Some(42)]);
    }

    #[test]
    fn failed_action_still_binds_compensation_without_output() {
        let ctx = TestContext::new(1);
        let wrapper = StepWrapper::new(FailingStep);

        let executed = wrapper.execute_erased(&ctx);

        assert_eq!(executed.error, Some(TestError("boom".to_string())));
        assert!(executed.compensation.compensate(&ctx).is_ok());
        assert_eq!(*ctx.compensated.borrow(), vec![None]);
    }
}
