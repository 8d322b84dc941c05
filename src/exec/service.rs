//! Command-pass service: accepts a pipeline request, runs it, reports a status code.

use std::fmt;

use crate::config::model::Config;
use crate::exec::runner::{PipelineRunner, RunOutput};
use crate::foundation::error::BcsError;
use crate::generate::pipeline::generate_pipeline;

/// Outcome of one request, with the wire codes peers expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecStatus {
    /// The engine ran and exited with status 0.
    Ok,
    /// Nothing usable was submitted.
    InvalidCommand,
    /// The engine ran and failed.
    CommandFailed,
    /// The engine could not be started.
    SpawnFailed,
}

impl ExecStatus {
    /// Wire code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ok => "0",
            Self::InvalidCommand => "1",
            Self::CommandFailed => "2",
            Self::SpawnFailed => "-1",
        }
    }
}

impl fmt::Display for ExecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One key/value entry of a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandPair {
    /// Key.
    pub key: String,
    /// Value; a serialized [`Config`] in the first pair of a config request.
    pub value: String,
}

impl CommandPair {
    /// Pair from anything string-like.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Reply to one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandResponse {
    /// Outcome.
    pub status: ExecStatus,
    /// Human-readable summary.
    pub message: String,
    /// Captured engine output, empty when nothing ran.
    pub output: String,
}

impl CommandResponse {
    fn new(status: ExecStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            output: String::new(),
        }
    }
}

/// Generates and executes pipelines through a [`PipelineRunner`].
#[derive(Debug)]
pub struct CommandService<R> {
    runner: R,
}

impl<R: PipelineRunner> CommandService<R> {
    /// Service backed by `runner`.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// The backing runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Generate the pipeline for `cfg` and run it.
    pub fn submit(&self, cfg: &Config) -> CommandResponse {
        match generate_pipeline(cfg) {
            Ok(pipeline) => self.execute(&pipeline.argv()),
            Err(e) => {
                tracing::warn!(error = %e, "rejected pipeline config");
                CommandResponse::new(
                    ExecStatus::InvalidCommand,
                    format!("failed to generate pipeline: {e}"),
                )
            }
        }
    }

    /// Handle a raw request.
    ///
    /// A first value holding a JSON object selects the config path; an object that is not a valid
    /// [`Config`] is rejected without running anything. Any other value is passed through
    /// verbatim as `-key value` flags.
    pub fn handle(&self, pairs: &[CommandPair]) -> CommandResponse {
        let Some(first) = pairs.first() else {
            return CommandResponse::new(ExecStatus::InvalidCommand, "no commands provided");
        };

        match serde_json::from_str::<serde_json::Value>(&first.value) {
            Ok(value @ serde_json::Value::Object(_)) => {
                match serde_json::from_value::<Config>(value).map_err(BcsError::from) {
                    Ok(cfg) => self.submit(&cfg),
                    Err(e) => {
                        tracing::warn!(error = %e, "rejected pipeline config");
                        CommandResponse::new(
                            ExecStatus::InvalidCommand,
                            format!("invalid pipeline config: {e}"),
                        )
                    }
                }
            }
            _ => {
                tracing::debug!("request is not a config, passing flags through");
                let args = pairs
                    .iter()
                    .flat_map(|p| [format!("-{}", p.key), p.value.clone()])
                    .collect::<Vec<_>>();
                self.execute(&args)
            }
        }
    }

    fn execute(&self, args: &[String]) -> CommandResponse {
        match self.runner.run(args) {
            Ok(RunOutput { exit_code, output }) if exit_code == Some(0) => CommandResponse {
                status: ExecStatus::Ok,
                message: "engine finished".to_string(),
                output,
            },
            Ok(RunOutput { exit_code, output }) => CommandResponse {
                status: ExecStatus::CommandFailed,
                message: match exit_code {
                    Some(code) => format!("engine failed with exit code {code}"),
                    None => "engine terminated by signal".to_string(),
                },
                output,
            },
            Err(e @ BcsError::Execution(_)) => {
                CommandResponse::new(ExecStatus::SpawnFailed, e.to_string())
            }
            Err(e) => CommandResponse::new(ExecStatus::CommandFailed, e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/service.rs"]
mod tests;
