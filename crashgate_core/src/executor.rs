use crate::input::InputBuffer;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Interpreter the analysis target runs under.
pub const TARGET_INTERPRETER: &str = "python3";

/// Script path handed to the interpreter, resolved against the harness's
/// working directory. Compiled in: the harness takes no target
/// configuration at runtime.
pub const TARGET_SCRIPT: &str = "./analyzer.py";

/// How the spawned target finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationOutcome {
    /// Normal exit with the given status code.
    Exited(i32),
    /// Killed by the given signal number.
    Signaled(i32),
    /// Neither an exit code nor a termination signal could be observed.
    Abnormal,
}

impl TerminationOutcome {
    fn from_status(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            TerminationOutcome::Exited(code)
        } else if let Some(signal) = status.signal() {
            TerminationOutcome::Signaled(signal)
        } else {
            TerminationOutcome::Abnormal
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExecError {
    #[error("failed to spawn target '{command}': {source}")]
    Spawn { command: String, source: io::Error },

    #[error("target stdin was not available after piping")]
    StdinUnavailable,

    /// Covers short writes too: `write_all` fails rather than returning a
    /// partial count.
    #[error("failed to write input to target stdin: {0}")]
    StdinWrite(io::Error),

    #[error("failed to wait for target termination: {0}")]
    Wait(io::Error),
}

pub struct TargetConfig {
    pub interpreter: String,
    pub script: PathBuf,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            interpreter: TARGET_INTERPRETER.to_string(),
            script: PathBuf::from(TARGET_SCRIPT),
        }
    }
}

/// Runs the analysis target once per input and reports how it terminated.
///
/// The payload travels over two channels at once: as the single argument
/// after the script path, and as the full contents of the target's stdin.
/// The target picks whichever is convenient; both carry the same bytes.
pub struct TargetExecutor {
    config: TargetConfig,
}

impl TargetExecutor {
    pub fn new(config: TargetConfig) -> Self {
        Self { config }
    }

    /// Spawns the target, delivers `input`, and blocks until it terminates.
    ///
    /// The wait is unbounded: hang handling belongs to the engine
    /// supervising this process, not to the harness. Any spawn or
    /// transport failure aborts the run, there is no retry.
    pub fn execute(&self, input: &InputBuffer) -> Result<TerminationOutcome, ExecError> {
        let payload = input.payload();

        // argv strings cannot carry NUL, so the argument copy stops at the
        // first interior one. The stdin copy always carries every byte.
        let arg_len = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());

        let mut child = Command::new(&self.config.interpreter)
            .arg(&self.config.script)
            .arg(OsStr::from_bytes(&payload[..arg_len]))
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| ExecError::Spawn {
                command: format!("{} {}", self.config.interpreter, self.config.script.display()),
                source: e,
            })?;

        let mut child_stdin = child.stdin.take().ok_or(ExecError::StdinUnavailable)?;
        if let Err(e) = child_stdin.write_all(payload) {
            log::error!("transport to target failed: {e}, killing target");
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExecError::StdinWrite(e));
        }
        // Dropping the write end signals end-of-stream to the target.
        drop(child_stdin);

        let status = child.wait().map_err(ExecError::Wait)?;
        Ok(TerminationOutcome::from_status(status))
    }
}
