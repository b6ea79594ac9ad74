//! External command execution.
//!
//! A [`CommandSpec`] describes one launch. A [`ProcessRunner`] executes it
//! either captured (both streams piped, relayed line by line to a
//! [`LineSink`]) or passthrough (streams inherited from our terminal).
//! Every failure is folded into the returned [`ExecutionResult`]; nothing
//! escapes the runner boundary.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, warn};

use crate::error::{MetanetError, Result};

use super::color::color_overrides;
use super::output::{LineSink, NullSink, OutputLine};

/// Immutable description of one external program launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Start a spec for `program`, resolved through `PATH`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment override (merged over the inherited environment).
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Run in `dir` instead of the current directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(&self.env);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// How a child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Both streams piped into the parent and buffered line by line.
    Captured,
    /// Both streams inherited from the parent's terminal.
    Passthrough,
}

/// Why an execution did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunFailure {
    /// The program could not be found or started.
    LaunchFailed { program: String, reason: String },
    /// The program ran and exited unsuccessfully (`None` if killed by signal).
    NonZeroExit { code: Option<i32> },
    /// Anything else that went wrong while wiring up or reading the child.
    Fault { message: String },
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LaunchFailed { program, reason } => {
                write!(f, "could not start {}: {}", program, reason)
            }
            Self::NonZeroExit { code: Some(code) } => write!(f, "exited with code {}", code),
            Self::NonZeroExit { code: None } => write!(f, "terminated by signal"),
            Self::Fault { message } => write!(f, "{}", message),
        }
    }
}

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Mode the command ran in.
    pub mode: ExecutionMode,

    /// Exit code (None if never started or killed by signal).
    pub exit_code: Option<i32>,

    /// Captured stdout lines (None in passthrough mode or on launch failure).
    pub stdout: Option<Vec<String>>,

    /// Captured stderr lines (None in passthrough mode or on launch failure).
    pub stderr: Option<Vec<String>>,

    /// Why the command failed, if it did.
    pub failure: Option<RunFailure>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl ExecutionResult {
    /// Result for a process that ran to completion.
    pub fn exited(
        mode: ExecutionMode,
        exit_code: Option<i32>,
        stdout: Option<Vec<String>>,
        stderr: Option<Vec<String>>,
        duration: Duration,
    ) -> Self {
        let success = exit_code == Some(0);
        Self {
            mode,
            exit_code,
            stdout,
            stderr,
            failure: (!success).then_some(RunFailure::NonZeroExit { code: exit_code }),
            duration,
            success,
        }
    }

    /// Result for a program that could not be started.
    pub fn launch_failed(
        mode: ExecutionMode,
        program: impl Into<String>,
        reason: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            mode,
            exit_code: None,
            stdout: None,
            stderr: None,
            failure: Some(RunFailure::LaunchFailed {
                program: program.into(),
                reason: reason.into(),
            }),
            duration,
            success: false,
        }
    }

    /// Result for an unexpected fault. Whatever was captured is kept.
    pub fn fault(
        mode: ExecutionMode,
        message: impl Into<String>,
        exit_code: Option<i32>,
        stdout: Option<Vec<String>>,
        stderr: Option<Vec<String>>,
        duration: Duration,
    ) -> Self {
        Self {
            mode,
            exit_code,
            stdout,
            stderr,
            failure: Some(RunFailure::Fault {
                message: message.into(),
            }),
            duration,
            success: false,
        }
    }

    /// Whether the program never started.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self.failure, Some(RunFailure::LaunchFailed { .. }))
    }

    /// Captured stdout lines, empty when nothing was captured.
    pub fn stdout_lines(&self) -> &[String] {
        self.stdout.as_deref().unwrap_or_default()
    }

    /// Captured stderr lines, empty when nothing was captured.
    pub fn stderr_lines(&self) -> &[String] {
        self.stderr.as_deref().unwrap_or_default()
    }

    /// Stdout text, then stderr text on a new line if stderr is not blank.
    pub fn combined_output(&self) -> String {
        let mut text = self.stdout_lines().join("\n");
        let err = self.stderr_lines().join("\n");
        if !err.trim().is_empty() {
            text.push('\n');
            text.push_str(&err);
        }
        text
    }
}

/// Executes command specs. Implemented by [`CommandRunner`] and by
/// [`MockRunner`](super::MockRunner) in tests.
pub trait ProcessRunner {
    /// Run with both streams piped, relaying each line to `sink`.
    ///
    /// Blocks until the process exits.
    fn run_captured(&self, spec: &CommandSpec, sink: &mut dyn LineSink) -> ExecutionResult;

    /// Run with streams attached to our own terminal.
    ///
    /// Blocks until the process exits.
    fn run_passthrough(&self, spec: &CommandSpec) -> ExecutionResult;

    /// Run captured and return stdout plus non-blank stderr as one string.
    ///
    /// A nonzero exit still yields the text. Only a launch failure or a
    /// fault is an error.
    fn capture_output_only(&self, spec: &CommandSpec) -> Result<String> {
        let result = self.run_captured(spec, &mut NullSink);
        match &result.failure {
            None => Ok(result.combined_output()),
            Some(RunFailure::NonZeroExit { code }) => {
                warn!(
                    "Command '{}' exited with code {:?}. {}",
                    spec,
                    code,
                    result.stderr_lines().join("\n")
                );
                Ok(result.combined_output())
            }
            Some(RunFailure::LaunchFailed { program, reason }) => {
                Err(MetanetError::LaunchFailed {
                    program: program.clone(),
                    reason: reason.clone(),
                })
            }
            Some(RunFailure::Fault { message }) => {
                Err(anyhow::anyhow!("{}: {}", spec, message).into())
            }
        }
    }
}

/// Lookup into the inherited environment.
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Runs real processes.
pub struct CommandRunner {
    disable_color: bool,
    env_lookup: EnvLookup,
}

impl CommandRunner {
    /// Create a runner that reads the real process environment.
    pub fn new() -> Self {
        Self::with_env(|key| std::env::var(key).ok())
    }

    /// Create a runner with a custom inherited-environment lookup.
    pub fn with_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            disable_color: false,
            env_lookup: Box::new(lookup),
        }
    }

    /// Ask children not to emit color.
    pub fn disable_color(mut self, disable: bool) -> Self {
        self.disable_color = disable;
        self
    }

    fn prepare(&self, spec: &CommandSpec, mode: ExecutionMode) -> Command {
        let mut cmd = spec.to_command();
        let overrides =
            color_overrides(mode, spec.get_env(), self.disable_color, &*self.env_lookup);
        for (key, value) in overrides {
            debug!("Setting {}={} for {}", key, value, spec.program());
            cmd.env(key, value);
        }
        cmd
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRunner")
            .field("disable_color", &self.disable_color)
            .finish_non_exhaustive()
    }
}

impl ProcessRunner for CommandRunner {
    fn run_captured(&self, spec: &CommandSpec, sink: &mut dyn LineSink) -> ExecutionResult {
        let mode = ExecutionMode::Captured;
        let start = Instant::now();

        let mut cmd = self.prepare(spec, mode);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!("Running (captured): {}", spec);
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!("Failed to start {}: {}", spec.program(), e);
                return ExecutionResult::launch_failed(
                    mode,
                    spec.program(),
                    e.to_string(),
                    start.elapsed(),
                );
            }
        };

        let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            _ => {
                let code = reap(&mut child);
                return ExecutionResult::fault(
                    mode,
                    "child process has no output pipes",
                    code,
                    None,
                    None,
                    start.elapsed(),
                );
            }
        };

        let (tx, rx) = mpsc::channel();
        let tx_stderr = tx.clone();

        let stdout_handle = thread::spawn(move || {
            forward_lines(stdout, |line| tx.send(OutputLine::Stdout(line)).is_ok())
                .context("failed reading stdout")
        });
        let stderr_handle = thread::spawn(move || {
            forward_lines(stderr, |line| tx_stderr.send(OutputLine::Stderr(line)).is_ok())
                .context("failed reading stderr")
        });

        // Single consumer: the only writer of both sequences.
        // A sink that panics is not called again; draining continues so the
        // child can finish and be waited on.
        let mut stdout_lines = Vec::new();
        let mut stderr_lines = Vec::new();
        let mut sink_panicked = false;
        for line in rx {
            if !sink_panicked {
                let delivered = panic::catch_unwind(AssertUnwindSafe(|| sink.on_line(&line)));
                sink_panicked = delivered.is_err();
            }
            match line {
                OutputLine::Stdout(text) => stdout_lines.push(text),
                OutputLine::Stderr(text) => stderr_lines.push(text),
            }
        }

        let mut faults = Vec::new();
        if sink_panicked {
            faults.push("output sink panicked".to_string());
        }
        for handle in [stdout_handle, stderr_handle] {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => faults.push(format!("{:#}", e)),
                Err(_) => faults.push("output reader thread panicked".to_string()),
            }
        }

        let status = child.wait();
        let duration = start.elapsed();

        match status {
            Ok(status) if faults.is_empty() => {
                debug!("{} exited with {:?}", spec.program(), status.code());
                ExecutionResult::exited(
                    mode,
                    status.code(),
                    Some(stdout_lines),
                    Some(stderr_lines),
                    duration,
                )
            }
            Ok(status) => {
                warn!("Fault while running {}: {}", spec, faults.join("; "));
                ExecutionResult::fault(
                    mode,
                    faults.join("; "),
                    status.code(),
                    Some(stdout_lines),
                    Some(stderr_lines),
                    duration,
                )
            }
            Err(e) => {
                warn!("Failed waiting for {}: {}", spec, e);
                ExecutionResult::fault(
                    mode,
                    format!("failed waiting for process: {}", e),
                    None,
                    Some(stdout_lines),
                    Some(stderr_lines),
                    duration,
                )
            }
        }
    }

    fn run_passthrough(&self, spec: &CommandSpec) -> ExecutionResult {
        let mode = ExecutionMode::Passthrough;
        let start = Instant::now();

        let mut cmd = self.prepare(spec, mode);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        debug!("Running (passthrough): {}", spec);
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!("Failed to start {}: {}", spec.program(), e);
                return ExecutionResult::launch_failed(
                    mode,
                    spec.program(),
                    e.to_string(),
                    start.elapsed(),
                );
            }
        };

        match child.wait() {
            Ok(status) => {
                debug!("{} exited with {:?}", spec.program(), status.code());
                ExecutionResult::exited(mode, status.code(), None, None, start.elapsed())
            }
            Err(e) => {
                warn!("Failed waiting for {}: {}", spec, e);
                ExecutionResult::fault(
                    mode,
                    format!("failed waiting for process: {}", e),
                    None,
                    None,
                    None,
                    start.elapsed(),
                )
            }
        }
    }
}

/// Kill and wait on a child we can no longer drive. Returns its exit code.
fn reap(child: &mut Child) -> Option<i32> {
    let _ = child.kill();
    child.wait().ok().and_then(|status| status.code())
}

/// Read `stream` line by line, handing each line to `emit`.
///
/// Lines end at `\n` with an optional `\r` stripped; a final line without
/// a terminator is still emitted. Invalid UTF-8 is replaced, never dropped.
/// Stops early if `emit` returns false.
fn forward_lines<R: Read>(stream: R, mut emit: impl FnMut(String) -> bool) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        if !emit(String::from_utf8_lossy(&buf).into_owned()) {
            return Ok(());
        }
    }
}
