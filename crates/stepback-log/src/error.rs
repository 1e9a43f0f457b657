use std::path::PathBuf;

use thiserror::Error;

/// Storage fault raised by a [`LogStore`](crate::LogStore).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogStoreError {
    #[error("failed to open log file at '{path}'")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log file at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write log event")]
    Write(#[from] std::io::Error),

    #[error("failed to encode log event")]
    Encode(#[from] serde_json::Error),

    #[error("malformed log entry at '{path}' line {line}")]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("log store lock was poisoned by a panicking writer")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::LogStoreError;

    #[test]
    fn open_error_includes_path() {
        let err = LogStoreError::Open {
            path: PathBuf::from("/var/log/saga.jsonl"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(err.to_string().contains("/var/log/saga.jsonl"));
    }

    #[test]
    fn io_error_converts_via_from() {
        let io_err = std::io::Error::other("disk full");

        let err: LogStoreError = io_err.into();

        assert!(matches!(err, LogStoreError::Write(_)));
    }
}
