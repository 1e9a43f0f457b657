use std::path::PathBuf;
use std::process::{Command, Stdio};

use indexmap::IndexMap;
use stepback_log::ExecutionId;
use stepback_saga::SagaStep;
use thiserror::Error;
use tracing::debug;

use crate::plan::PlanStep;

pub(crate) const OUTPUT_VAR: &str = "STEPBACK_OUTPUT";
pub(crate) const STEP_VAR: &str = "STEPBACK_STEP";
pub(crate) const EXECUTION_ID_VAR: &str = "STEPBACK_EXECUTION_ID";

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("failed to start '{shell}'")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command `{command}` exited with {}{}", describe_status(*.code), describe_stderr(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Execution context shared by every shell step of one run.
#[derive(Debug, Clone)]
pub(crate) struct ShellContext {
    pub(crate) shell: String,
    pub(crate) working_dir: PathBuf,
    pub(crate) env: IndexMap<String, String>,
    pub(crate) execution_id: ExecutionId,
}

impl ShellContext {
    /// Run `script` through `<shell> -c`, returning its trimmed stdout.
    fn run(&self, step: &str, script: &str, output: Option<&str>) -> Result<String, CommandError> {
        let mut command = Command::new(&self.shell);
        command
            .arg("-c")
            .arg(script)
            .current_dir(&self.working_dir)
            .envs(&self.env)
            .env(STEP_VAR, step)
            .env(EXECUTION_ID_VAR, self.execution_id.as_str())
            .stdin(Stdio::null());
        if let Some(output) = output {
            command.env(OUTPUT_VAR, output);
        }

        let result = command.output().map_err(|source| CommandError::Spawn {
            shell: self.shell.clone(),
            source,
        })?;
        let stdout = String::from_utf8_lossy(&result.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();

        if !result.status.success() {
            return Err(CommandError::Failed {
                command: script.to_string(),
                code: result.status.code(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            debug!(step, %stderr, "command wrote to stderr");
        }
        Ok(stdout)
    }
}

/// A saga step backed by a shell command and an optional undo command.
#[derive(Debug)]
pub(crate) struct ShellStep {
    name: String,
    run: String,
    compensate: Option<String>,
    description: Option<String>,
}

impl From<PlanStep> for ShellStep {
    fn from(step: PlanStep) -> Self {
        Self {
            name: step.name,
            run: step.run,
            compensate: step.compensate,
            description: step.description,
        }
    }
}

impl SagaStep for ShellStep {
    type Output = String;
    type Context = ShellContext;
    type Error = CommandError;

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &Self::Context) -> Result<Self::Output, Self::Error> {
        debug!(step = %self.name, command = %self.run, "running step command");
        ctx.run(&self.name, &self.run, None)
    }

    fn compensate(
        &self,
        ctx: &Self::Context,
        output: Option<Self::Output>,
    ) -> Result<(), Self::Error> {
        let Some(script) = &self.compensate else {
            debug!(step = %self.name, "no compensation command");
            return Ok(());
        };
        debug!(step = %self.name, command = %script, "running compensation command");
        ctx.run(&self.name, script, Some(output.as_deref().unwrap_or_default()))
            .map(|_| ())
    }

    fn compensation_description(&self) -> String {
        match (&self.description, &self.compensate) {
            (Some(description), _) => description.clone(),
            (None, Some(script)) => format!("run `{script}`"),
            (None, None) => "nothing to undo".to_string(),
        }
    }
}
