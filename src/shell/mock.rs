//! Mock process runner for testing.
//!
//! `MockRunner` implements [`ProcessRunner`] without spawning anything.
//! Responses are queued up front and handed out in call order; every
//! spec it receives is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use metanet::shell::{CommandSpec, ExecutionMode, MockResponse, MockRunner, ProcessRunner};
//!
//! let runner = MockRunner::new();
//! runner.push(MockResponse::success().with_stdout(["snitch  1.0.0  snitch"]));
//!
//! let text = runner
//!     .capture_output_only(&CommandSpec::new("dotnet").args(["tool", "list", "-g"]))
//!     .unwrap();
//! assert!(text.contains("snitch"));
//! assert_eq!(runner.calls()[0].0, ExecutionMode::Captured);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use super::command::{CommandSpec, ExecutionMode, ExecutionResult, ProcessRunner};
use super::output::{LineSink, OutputLine};

/// A canned outcome for one mocked invocation.
#[derive(Debug, Clone)]
pub struct MockResponse {
    exit_code: Option<i32>,
    launch_error: Option<String>,
    stdout: Vec<String>,
    stderr: Vec<String>,
}

impl MockResponse {
    /// Exit code 0, no output.
    pub fn success() -> Self {
        Self::exit(0)
    }

    /// Exit with the given code, no output.
    pub fn exit(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            launch_error: None,
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }

    /// The program could not be started.
    pub fn launch_failure(reason: &str) -> Self {
        Self {
            exit_code: None,
            launch_error: Some(reason.to_string()),
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }

    /// Lines written to stdout (captured mode only).
    pub fn with_stdout<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stdout = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Lines written to stderr (captured mode only).
    pub fn with_stderr<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stderr = lines.into_iter().map(Into::into).collect();
        self
    }
}

/// Process runner that replays queued responses.
///
/// When the queue is empty, every call succeeds with no output.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: RefCell<VecDeque<MockResponse>>,
    calls: RefCell<Vec<(ExecutionMode, CommandSpec)>>,
}

impl MockRunner {
    /// Create a runner with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next call.
    pub fn push(&self, response: MockResponse) {
        self.responses.borrow_mut().push_back(response);
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<(ExecutionMode, CommandSpec)> {
        self.calls.borrow().clone()
    }

    /// Display strings of all specs run so far.
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, spec)| spec.to_string())
            .collect()
    }

    fn next(&self, mode: ExecutionMode, spec: &CommandSpec) -> MockResponse {
        self.calls.borrow_mut().push((mode, spec.clone()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(MockResponse::success)
    }
}

impl ProcessRunner for MockRunner {
    fn run_captured(&self, spec: &CommandSpec, sink: &mut dyn LineSink) -> ExecutionResult {
        let mode = ExecutionMode::Captured;
        let response = self.next(mode, spec);
        if let Some(reason) = response.launch_error {
            return ExecutionResult::launch_failed(mode, spec.program(), reason, Duration::ZERO);
        }

        for line in &response.stdout {
            sink.on_line(&OutputLine::Stdout(line.clone()));
        }
        for line in &response.stderr {
            sink.on_line(&OutputLine::Stderr(line.clone()));
        }

        ExecutionResult::exited(
            mode,
            response.exit_code,
            Some(response.stdout),
            Some(response.stderr),
            Duration::ZERO,
        )
    }

    fn run_passthrough(&self, spec: &CommandSpec) -> ExecutionResult {
        let mode = ExecutionMode::Passthrough;
        let response = self.next(mode, spec);
        match response.launch_error {
            Some(reason) => {
                ExecutionResult::launch_failed(mode, spec.program(), reason, Duration::ZERO)
            }
            None => ExecutionResult::exited(mode, response.exit_code, None, None, Duration::ZERO),
        }
    }
}
