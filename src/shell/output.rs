//! Output lines and the sinks that receive them.

/// Output line from command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

impl OutputLine {
    /// The line text without its terminator.
    pub fn text(&self) -> &str {
        match self {
            Self::Stdout(text) | Self::Stderr(text) => text,
        }
    }

    /// Whether the line came from standard error.
    pub fn is_stderr(&self) -> bool {
        matches!(self, Self::Stderr(_))
    }
}

/// Receives lines as a captured command produces them.
///
/// Lines arrive in order within each stream. Both streams are delivered
/// from the calling thread, so implementations need no locking.
pub trait LineSink {
    /// Called once per line.
    fn on_line(&mut self, line: &OutputLine);
}

impl<F> LineSink for F
where
    F: FnMut(&OutputLine),
{
    fn on_line(&mut self, line: &OutputLine) {
        self(line)
    }
}

/// Sink that drops every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LineSink for NullSink {
    fn on_line(&mut self, _line: &OutputLine) {}
}

/// Sink that records every line in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    lines: Vec<OutputLine>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines, interleaved as they were delivered.
    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    /// Recorded stdout text, in order.
    pub fn stdout(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| !l.is_stderr())
            .map(OutputLine::text)
            .collect()
    }

    /// Recorded stderr text, in order.
    pub fn stderr(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| l.is_stderr())
            .map(OutputLine::text)
            .collect()
    }
}

impl LineSink for RecordingSink {
    fn on_line(&mut self, line: &OutputLine) {
        self.lines.push(line.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_line_text_and_stream() {
        let out = OutputLine::Stdout("hello".to_string());
        let err = OutputLine::Stderr("oops".to_string());
        assert_eq!(out.text(), "hello");
        assert!(!out.is_stderr());
        assert_eq!(err.text(), "oops");
        assert!(err.is_stderr());
    }

    #[test]
    fn recording_sink_splits_streams() {
        let mut sink = RecordingSink::new();
        sink.on_line(&OutputLine::Stdout("a".to_string()));
        sink.on_line(&OutputLine::Stderr("b".to_string()));
        sink.on_line(&OutputLine::Stdout("c".to_string()));

        assert_eq!(sink.lines().len(), 3);
        assert_eq!(sink.stdout(), vec!["a", "c"]);
        assert_eq!(sink.stderr(), vec!["b"]);
    }

    #[test]
    fn closures_are_sinks() {
        let mut count = 0;
        {
            let mut sink = |_: &OutputLine| count += 1;
            sink.on_line(&OutputLine::Stdout("x".to_string()));
            sink.on_line(&OutputLine::Stderr("y".to_string()));
        }
        assert_eq!(count, 2);
    }
}
