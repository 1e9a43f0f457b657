use std::sync::Mutex;

use crate::error::LogStoreError;
use crate::event::LogEvent;
use crate::id::ExecutionId;
use crate::store::LogStore;

/// In-memory log store, mostly useful for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended events, in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if a writer panicked while holding the lock.
    pub fn events(&self) -> Result<Vec<LogEvent>, LogStoreError> {
        let events = self.events.lock().map_err(|_| LogStoreError::Poisoned)?;
        Ok(events.clone())
    }

    /// Snapshot of the events belonging to one execution, in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if a writer panicked while holding the lock.
    pub fn events_for(&self, execution_id: &ExecutionId) -> Result<Vec<LogEvent>, LogStoreError> {
        let events = self.events.lock().map_err(|_| LogStoreError::Poisoned)?;
        Ok(events
            .iter()
            .filter(|event| &event.execution_id == execution_id)
            .cloned()
            .collect())
    }
}

impl LogStore for MemoryLogStore {
    fn append(&self, event: &LogEvent) -> Result<(), LogStoreError> {
        let mut events = self.events.lock().map_err(|_| LogStoreError::Poisoned)?;
        events.push(event.clone());
        Ok(())
    }
}
