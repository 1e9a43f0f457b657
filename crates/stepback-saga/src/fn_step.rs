use std::marker::PhantomData;

use crate::step::SagaStep;

/// A [`SagaStep`] assembled from an action closure and a compensation closure.
///
/// Built with [`step_fn`].
pub struct FnStep<Ctx, Out, Err, A, C> {
    name: String,
    action: A,
    compensation: C,
    _marker: PhantomData<fn(&Ctx) -> (Out, Err)>,
}

/// Build a step from two closures.
///
/// The action receives the execution context; the compensation receives the
/// context and the action's output (`None` when compensating the step whose
/// own action failed).
///
/// ```
/// use stepback_saga::{SagaBuilder, step_fn};
///
/// struct Inventory;
///
/// let saga = SagaBuilder::<Inventory, String>::new("order")
///     .step(step_fn(
///         "reserve",
///         |_: &Inventory| Ok(42_u32),
///         |_: &Inventory, reservation: Option<u32>| {
///             let _ = reservation;
///             Ok(())
///         },
///     ))
///     .build();
///
/// assert_eq!(saga.len(), 1);
/// ```
pub fn step_fn<Ctx, Out, Err, A, C>(
    name: impl Into<String>,
    action: A,
    compensation: C,
) -> FnStep<Ctx, Out, Err, A, C>
where
    A: Fn(&Ctx) -> Result<Out, Err> + Send + Sync,
    C: Fn(&Ctx, Option<Out>) -> Result<(), Err> + Send + Sync,
{
    FnStep {
        name: name.into(),
        action,
        compensation,
        _marker: PhantomData,
    }
}

impl<Ctx, Out, Err, A, C> SagaStep for FnStep<Ctx, Out, Err, A, C>
where
    A: Fn(&Ctx) -> Result<Out, Err> + Send + Sync,
    C: Fn(&Ctx, Option<Out>) -> Result<(), Err> + Send + Sync,
{
    type Output = Out;
    type Context = Ctx;
    type Error = Err;

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &Self::Context) -> Result<Self::Output, Self::Error> {
        (self.action)(ctx)
    }

    fn compensate(
        &self,
        ctx: &Self::Context,
        output: Option<Self::Output>,
    ) -> Result<(), Self::Error> {
        (self.compensation)(ctx, output)
    }
}
