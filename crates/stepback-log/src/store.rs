use std::sync::Arc;

use crate::error::LogStoreError;
use crate::event::LogEvent;

/// Append-only sink for saga log events.
///
/// Appends go through a shared reference: one store may be shared by
/// several coordinators running on different threads, so implementations
/// must serialize concurrent appends themselves. Events must be persisted in
/// the order `append` is called.
pub trait LogStore: Send + Sync {
    /// Append one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be stored.
    fn append(&self, event: &LogEvent) -> Result<(), LogStoreError>;
}

impl<S: LogStore + ?Sized> LogStore for &S {
    fn append(&self, event: &LogEvent) -> Result<(), LogStoreError> {
        (**self).append(event)
    }
}

impl<S: LogStore + ?Sized> LogStore for Box<S> {
    fn append(&self, event: &LogEvent) -> Result<(), LogStoreError> {
        (**self).append(event)
    }
}

impl<S: LogStore + ?Sized> LogStore for Arc<S> {
    fn append(&self, event: &LogEvent) -> Result<(), LogStoreError> {
        (**self).append(event)
    }
}
