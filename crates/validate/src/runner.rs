//! Running one validator over one file

use crate::search_path::SearchPath;
use crate::spec::ValidatorSpec;
use async_trait::async_trait;
use bitcheck_errors::{Error, ValidatorError};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// What a validator printed, and how it exited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    /// Exit code; `None` if the process was ended by a signal
    pub status: Option<i32>,
    /// Stdout text followed by stderr text
    pub output: String,
}

impl RawOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Trait for validator process execution
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run `spec` against `path` and capture its output
    async fn run(&self, spec: &ValidatorSpec, path: &Path) -> Result<RawOutput, Error>;
}

/// Spawns validators as child processes
#[derive(Debug, Clone, Default)]
pub struct ValidatorRunner {
    search_path: SearchPath,
    timeout: Option<Duration>,
}

impl ValidatorRunner {
    #[must_use]
    pub fn new(search_path: SearchPath) -> Self {
        Self {
            search_path,
            timeout: None,
        }
    }

    /// Kill validators that run longer than `timeout`
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }
}

#[async_trait]
impl ToolRunner for ValidatorRunner {
    async fn run(&self, spec: &ValidatorSpec, path: &Path) -> Result<RawOutput, Error> {
        let program = self
            .search_path
            .resolve(&spec.tool)
            .ok_or_else(|| ValidatorError::ToolUnavailable {
                tool: spec.tool.clone(),
            })?;

        let mut cmd = Command::new(&program);
        cmd.args(spec.expand_args(path))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(tool = %spec.tool, path = %path.display(), "running validator");

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| ValidatorError::TimedOut {
                    tool: spec.tool.clone(),
                    seconds: limit.as_secs(),
                })?,
            None => cmd.output().await,
        }
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ValidatorError::ToolUnavailable {
                tool: spec.tool.clone(),
            },
            _ => ValidatorError::SpawnFailed {
                tool: spec.tool.clone(),
                message: e.to_string(),
            },
        })?;

        Ok(RawOutput {
            status: output.status.code(),
            output: merge_output(&output.stdout, &output.stderr),
        })
    }
}

/// Concatenate both streams, keeping them on separate lines
fn merge_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut merged = String::from_utf8_lossy(stdout).into_owned();
    if !merged.is_empty() && !merged.ends_with('\n') && !stderr.is_empty() {
        merged.push('\n');
    }
    merged.push_str(&String::from_utf8_lossy(stderr));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_output_orders_stdout_first() {
        assert_eq!(merge_output(b"out\n", b"err\n"), "out\nerr\n");
        assert_eq!(merge_output(b"out", b"err"), "out\nerr");
        assert_eq!(merge_output(b"", b"err"), "err");
        assert_eq!(merge_output(b"out", b""), "out");
    }

    #[tokio::test]
    async fn test_unresolvable_tool() {
        let search = SearchPath::from_dirs(Vec::<std::path::PathBuf>::new()).unwrap();
        let runner = ValidatorRunner::new(search);
        let spec = ValidatorSpec::new(bitcheck_types::MediaType::Mp3, "mp3val", &["{path}"]);

        assert!(runner.search_path().resolve(&spec.tool).is_none());
        let err = runner.run(&spec, Path::new("/x.mp3")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validator(ValidatorError::ToolUnavailable { .. })
        ));
    }
}
