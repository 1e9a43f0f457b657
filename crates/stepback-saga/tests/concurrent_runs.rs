//! Integration tests for playing one saga definition from several threads.

use std::cell::RefCell;
use std::sync::Arc;
use std::thread;

use stepback_log::{EventKind, ExecutionId, MemoryLogStore};
use stepback_saga::{ExecutionCoordinator, SagaBuilder, step_fn};

struct Account {
    id: usize,
    balance: RefCell<i64>,
}

const RUNS: usize = 8;

#[test]
fn shared_saga_runs_independently_per_thread() -> anyhow::Result<()> {
    let saga = SagaBuilder::<Account, String>::new("transfer")
        .step(step_fn(
            "debit",
            |account: &Account| {
                *account.balance.borrow_mut() -= 10;
                Ok(10_i64)
            },
            |account: &Account, amount: Option<i64>| {
                *account.balance.borrow_mut() += amount.unwrap_or_default();
                Ok(())
            },
        ))
        .step(step_fn(
            "credit",
            |account: &Account| {
                if account.id % 2 == 0 {
                    Ok(())
                } else {
                    Err(format!("account {} is frozen", account.id))
                }
            },
            |_: &Account, _: Option<()>| Ok(()),
        ))
        .build();
    let store = Arc::new(MemoryLogStore::new());

    let balances: Vec<i64> = thread::scope(|scope| {
        let handles: Vec<_> = (0..RUNS)
            .map(|id| {
                let saga = &saga;
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    let account = Account {
                        id,
                        balance: RefCell::new(100),
                    };
                    let result = ExecutionCoordinator::new(saga, store, &account)
                        .with_execution_id(format!("run-{id}"))
                        .play()
                        .expect("compensations never fail here");
                    assert_eq!(result.is_success(), id % 2 == 0);
                    *account.balance.borrow()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("run thread panicked"))
            .collect()
    });

    for (id, balance) in balances.iter().enumerate() {
        let expected = if id % 2 == 0 { 90 } else { 100 };
        assert_eq!(*balance, expected, "run {id}");
    }

    for id in 0..RUNS {
        let events = store.events_for(&ExecutionId::new(format!("run-{id}")))?;
        let first = events.first().map(|e| e.kind);
        let last = events.last().map(|e| e.kind);
        assert_eq!(first, Some(EventKind::SagaStarted));
        assert_eq!(last, Some(EventKind::SagaCompleted));
        let expected_len = if id % 2 == 0 { 4 } else { 7 };
        assert_eq!(events.len(), expected_len, "run {id}");
    }
    Ok(())
}
