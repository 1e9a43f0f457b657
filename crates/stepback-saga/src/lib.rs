//! Saga execution coordinator.
//!
//! A saga is an ordered list of steps, each pairing a forward action with a
//! compensation. The [`ExecutionCoordinator`] runs the actions in order,
//! records every transition in a [`LogStore`](stepback_log::LogStore), and
//! when an action fails compensates every started step in reverse order.
//!
//! ```
//! use std::cell::RefCell;
//!
//! use stepback_log::MemoryLogStore;
//! use stepback_saga::{SagaBuilder, step_fn};
//!
//! struct Bank {
//!     balance: RefCell<i64>,
//! }
//!
//! let saga = SagaBuilder::<Bank, String>::new("transfer")
//!     .step(step_fn(
//!         "withdraw",
//!         |bank: &Bank| {
//!             *bank.balance.borrow_mut() -= 30;
//!             Ok(30_i64)
//!         },
//!         |bank: &Bank, amount: Option<i64>| {
//!             *bank.balance.borrow_mut() += amount.unwrap_or_default();
//!             Ok(())
//!         },
//!     ))
//!     .step(step_fn(
//!         "deposit",
//!         |_: &Bank| Err::<(), _>("recipient account closed".to_string()),
//!         |_: &Bank, _: Option<()>| Ok(()),
//!     ))
//!     .build();
//!
//! let bank = Bank { balance: RefCell::new(100) };
//! let store = MemoryLogStore::new();
//!
//! let result = saga.play(&bank, &store).expect("compensation cannot fail here");
//!
//! assert_eq!(result.error().map(String::as_str), Some("recipient account closed"));
//! assert_eq!(*bank.balance.borrow(), 100);
//! ```

mod builder;
mod coordinator;
mod erased;
mod error;
mod fn_step;
mod result;
mod saga;
mod step;

pub use builder::SagaBuilder;
pub use coordinator::ExecutionCoordinator;
pub use error::{StepFailed, Unrecoverable};
pub use fn_step::{FnStep, step_fn};
pub use result::SagaResult;
pub use saga::Saga;
pub use step::SagaStep;
