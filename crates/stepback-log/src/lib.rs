//! Append-only audit log for saga executions.
//!
//! Every state transition of a saga run is recorded as a [`LogEvent`] and
//! handed to a [`LogStore`]. Stores only need to support appending; the log
//! is an audit trail and is never used to rebuild a run.

mod error;
mod event;
mod id;
mod jsonl;
mod memory;
mod store;

pub use error::LogStoreError;
pub use event::{EventKind, LogEvent};
pub use id::ExecutionId;
pub use jsonl::{JsonLinesLogStore, read_events};
pub use memory::MemoryLogStore;
pub use store::LogStore;
