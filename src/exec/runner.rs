use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{BcsError, BcsResult};

/// Result of one engine run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutput {
    /// Process exit code; `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured stdout followed by stderr.
    pub output: String,
}

impl RunOutput {
    /// Whether the engine exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Executes an engine command line.
///
/// `Err` means the process could not be started at all; a started process that fails is an
/// `Ok` with a non-zero exit code.
pub trait PipelineRunner {
    /// Run the engine with `args` (program name excluded) and wait for it to finish.
    fn run(&self, args: &[String]) -> BcsResult<RunOutput>;
}

/// Runs a system `ffmpeg` binary.
#[derive(Clone, Debug)]
pub struct FfmpegRunner {
    binary: PathBuf,
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegRunner {
    /// Runner for `binary`, resolved through `PATH` when not absolute.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Configured binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Whether the binary starts and answers `-version`.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl PipelineRunner for FfmpegRunner {
    fn run(&self, args: &[String]) -> BcsResult<RunOutput> {
        tracing::info!(
            binary = %self.binary.display(),
            args = %args.join(" "),
            "starting engine"
        );

        let out = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                BcsError::execution(format!(
                    "failed to spawn '{}': {e}",
                    self.binary.display()
                ))
            })?;

        let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&out.stderr));

        let result = RunOutput {
            exit_code: out.status.code(),
            output,
        };
        if !result.success() {
            tracing::warn!(exit_code = ?result.exit_code, "engine exited with failure");
        }
        Ok(result)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/exec/runner.rs"]
mod tests;
