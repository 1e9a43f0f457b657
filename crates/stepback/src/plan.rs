use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use stepback_log::ExecutionId;
use stepback_saga::{Saga, SagaBuilder};
use thiserror::Error;

use crate::shell::{CommandError, ShellContext, ShellStep};

const DEFAULT_SHELL: &str = "sh";
const DEFAULT_LOG_FILE: &str = "stepback.jsonl";

#[derive(Debug, Error)]
pub(crate) enum PlanError {
    #[error("failed to read plan at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse plan at '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("plan at '{path}' has an empty saga name")]
    EmptyName { path: PathBuf },

    #[error("step #{index} in '{path}' has an empty name")]
    EmptyStepName { path: PathBuf, index: usize },

    #[error("step name '{name}' appears more than once in '{path}'")]
    DuplicateStep { path: PathBuf, name: String },

    #[error("step '{step}' in '{path}' has an empty run command")]
    EmptyCommand { path: PathBuf, step: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
    name: String,
    shell: Option<String>,
    working_dir: Option<PathBuf>,
    log: Option<PathBuf>,
    #[serde(default)]
    env: IndexMap<String, String>,
    #[serde(default)]
    steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PlanStep {
    pub(crate) name: String,
    pub(crate) run: String,
    pub(crate) compensate: Option<String>,
    pub(crate) description: Option<String>,
}

/// A validated saga plan with every path resolved against the plan's directory.
#[derive(Debug)]
pub(crate) struct Plan {
    pub(crate) name: String,
    pub(crate) shell: String,
    pub(crate) working_dir: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) env: IndexMap<String, String>,
    pub(crate) steps: Vec<PlanStep>,
}

impl Plan {
    pub(crate) fn load(path: &Path) -> Result<Self, PlanError> {
        let content = std::fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    pub(crate) fn parse(content: &str, path: &Path) -> Result<Self, PlanError> {
        let file: PlanFile = toml::from_str(content).map_err(|source| PlanError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        validate(&file, path)?;

        let base_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let working_dir = match file.working_dir {
            Some(dir) => base_dir.join(dir),
            None => base_dir.to_path_buf(),
        };
        let log_path = base_dir.join(file.log.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)));

        Ok(Self {
            name: file.name,
            shell: file.shell.unwrap_or_else(|| DEFAULT_SHELL.to_string()),
            working_dir,
            log_path,
            env: file.env,
            steps: file.steps,
        })
    }

    pub(crate) fn build_saga(&self) -> Saga<ShellContext, CommandError> {
        self.steps
            .iter()
            .cloned()
            .fold(SagaBuilder::new(self.name.clone()), |builder, step| {
                builder.step(ShellStep::from(step))
            })
            .build()
    }

    pub(crate) fn context(&self, execution_id: ExecutionId) -> ShellContext {
        ShellContext {
            shell: self.shell.clone(),
            working_dir: self.working_dir.clone(),
            env: self.env.clone(),
            execution_id,
        }
    }
}

fn validate(file: &PlanFile, path: &Path) -> Result<(), PlanError> {
    if file.name.trim().is_empty() {
        return Err(PlanError::EmptyName {
            path: path.to_path_buf(),
        });
    }

    let mut seen = HashSet::new();
    for (index, step) in file.steps.iter().enumerate() {
        if step.name.trim().is_empty() {
            return Err(PlanError::EmptyStepName {
                path: path.to_path_buf(),
                index,
            });
        }
        if !seen.insert(step.name.as_str()) {
            return Err(PlanError::DuplicateStep {
                path: path.to_path_buf(),
                name: step.name.clone(),
            });
        }
        if step.run.trim().is_empty() {
            return Err(PlanError::EmptyCommand {
                path: path.to_path_buf(),
                step: step.name.clone(),
            });
        }
    }
    Ok(())
}
