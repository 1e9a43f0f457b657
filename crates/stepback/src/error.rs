use stepback_log::{ExecutionId, LogStoreError};
use stepback_saga::{StepFailed, Unrecoverable};
use thiserror::Error;

use crate::plan::PlanError;
use crate::shell::CommandError;

const EXIT_ROLLED_BACK: u8 = 1;
const EXIT_ERROR: u8 = 2;
const EXIT_UNRECOVERABLE: u8 = 3;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("invalid saga plan")]
    Plan(#[from] PlanError),

    #[error("saga log error")]
    Log(#[from] LogStoreError),

    #[error("saga '{saga}' was rolled back (execution {execution_id})")]
    RolledBack {
        saga: String,
        execution_id: ExecutionId,
        #[source]
        source: StepFailed<CommandError>,
    },

    #[error("saga '{saga}' could not be rolled back; manual cleanup required (execution {execution_id})")]
    Unrecoverable {
        saga: String,
        execution_id: ExecutionId,
        #[source]
        source: Unrecoverable<CommandError>,
    },
}

impl CliError {
    pub(crate) fn exit_code(&self) -> u8 {
        match self {
            Self::RolledBack { .. } => EXIT_ROLLED_BACK,
            Self::Unrecoverable { .. } => EXIT_UNRECOVERABLE,
            Self::Plan(_) | Self::Log(_) => EXIT_ERROR,
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, CliError>;
