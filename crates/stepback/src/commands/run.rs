use stepback_log::{ExecutionId, JsonLinesLogStore};
use stepback_saga::ExecutionCoordinator;
use tracing::{debug, info};

use super::RunArgs;
use crate::error::{CliError, Result};
use crate::plan::Plan;

pub(crate) fn run(args: RunArgs) -> Result<()> {
    let plan = Plan::load(&args.plan)?;
    let saga = plan.build_saga();

    let log_path = args.log.unwrap_or_else(|| plan.log_path.clone());
    let store = JsonLinesLogStore::open(log_path.clone())?;
    debug!(log = %log_path.display(), "appending events");

    let execution_id = args
        .execution_id
        .map_or_else(ExecutionId::generate, ExecutionId::from);
    let ctx = plan.context(execution_id.clone());

    info!(saga = %saga.name(), %execution_id, steps = saga.len(), "running plan");
    let result = ExecutionCoordinator::new(&saga, &store, &ctx)
        .with_execution_id(execution_id.clone())
        .play()
        .map_err(|source| CliError::Unrecoverable {
            saga: saga.name().to_string(),
            execution_id: execution_id.clone(),
            source,
        })?;

    result.into_result().map_err(|source| CliError::RolledBack {
        saga: saga.name().to_string(),
        execution_id: execution_id.clone(),
        source,
    })?;

    println!(
        "saga '{}' completed (execution {execution_id})",
        saga.name()
    );
    Ok(())
}
