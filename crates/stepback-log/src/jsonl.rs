use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::LogStoreError;
use crate::event::LogEvent;
use crate::store::LogStore;

/// Log store writing one JSON object per line to a file.
///
/// The file is opened in append mode and flushed after every event, so each
/// event is on disk before the coordinator moves to the next transition.
#[derive(Debug)]
pub struct JsonLinesLogStore {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesLogStore {
    /// Open `path` for appending, creating it if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogStoreError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogStoreError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogStore for JsonLinesLogStore {
    fn append(&self, event: &LogEvent) -> Result<(), LogStoreError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = self.file.lock().map_err(|_| LogStoreError::Poisoned)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Read every event from a JSON-lines log file, skipping blank lines.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is not a valid event.
pub fn read_events(path: &Path) -> Result<Vec<LogEvent>, LogStoreError> {
    let file = File::open(path).map_err(|source| LogStoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut events = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| LogStoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|source| LogStoreError::Decode {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}
