use std::fmt;

use serde::{Deserialize, Serialize};

const PETNAME_WORDS: u8 = 3;

/// Opaque identity correlating every log event of one saga run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionId(String);

impl ExecutionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a human-readable id such as `gladly-brave-otter`.
    #[must_use]
    pub fn generate() -> Self {
        if let Some(name) = petname::petname(PETNAME_WORDS, "-") {
            return Self(name);
        }

        let timestamp = chrono::Utc::now().timestamp_millis();
        Self(format!("execution-{timestamp}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExecutionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ExecutionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
