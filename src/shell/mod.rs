//! External process execution and output relay.

pub mod color;
pub mod command;
pub mod mock;
pub mod output;

pub use color::{FORCE_COLOR, NO_COLOR};
pub use command::{
    CommandRunner, CommandSpec, EnvLookup, ExecutionMode, ExecutionResult, ProcessRunner,
    RunFailure,
};
pub use mock::{MockResponse, MockRunner};
pub use output::{LineSink, NullSink, OutputLine, RecordingSink};
