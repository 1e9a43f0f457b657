use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ExecutionId;

/// Kind of transition recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum EventKind {
    /// The run began.
    SagaStarted,
    /// A step's forward action is about to run.
    StepStarted,
    /// A step's compensation is about to run.
    StepCompensating,
    /// A forward action failed and compensation begins.
    SagaAborted,
    /// The run reached its terminal state.
    SagaCompleted,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SagaStarted => "saga_started",
            Self::StepStarted => "step_started",
            Self::StepCompensating => "step_compensating",
            Self::SagaAborted => "saga_aborted",
            Self::SagaCompleted => "saga_completed",
        }
    }

    const fn symbol(self) -> &'static str {
        match self {
            Self::SagaStarted => "▶",
            Self::StepStarted => "→",
            Self::StepCompensating => "↩",
            Self::SagaAborted => "✗",
            Self::SagaCompleted => "■",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only saga log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub execution_id: ExecutionId,
    pub saga: String,
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    /// Only set on [`EventKind::SagaAborted`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_to_compensate: Option<usize>,
}

impl LogEvent {
    /// Create an event timestamped now, without step information.
    #[must_use]
    pub fn new(execution_id: &ExecutionId, saga: &str, kind: EventKind) -> Self {
        Self {
            execution_id: execution_id.clone(),
            saga: saga.to_string(),
            timestamp: Utc::now(),
            kind,
            step_index: None,
            step_name: None,
            steps_to_compensate: None,
        }
    }

    #[must_use]
    pub fn with_step(mut self, index: usize, name: &str) -> Self {
        self.step_index = Some(index);
        self.step_name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn with_steps_to_compensate(mut self, count: usize) -> Self {
        self.steps_to_compensate = Some(count);
        self
    }

    /// Single-line rendering for terminal output.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} {} [{}] {} {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.kind.symbol(),
            self.execution_id,
            self.saga,
            self.kind,
        );
        if let (Some(index), Some(name)) = (self.step_index, self.step_name.as_deref()) {
            line.push_str(&format!(" #{index} {name}"));
        }
        if let Some(count) = self.steps_to_compensate {
            line.push_str(&format!(" ({count} to compensate)"));
        }
        line
    }
}
