//! Visual theme and styling.

use console::{measure_text_width, Style};

use crate::shell::OutputLine;

/// MetaNet's visual theme.
#[derive(Debug, Clone)]
pub struct MetanetTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for the application banner (blue bold).
    pub header: Style,
    /// Style for horizontal rules (grey).
    pub rule: Style,
    /// Style for commands echoed before running (dim italic).
    pub command: Style,
    /// Style for relayed stdout lines (grey).
    pub stdout: Style,
    /// Style for relayed stderr lines (red).
    pub stderr: Style,
}

impl Default for MetanetTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl MetanetTheme {
    /// Create the default MetaNet theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold().color256(33),
            rule: Style::new().color256(244),
            command: Style::new().dim().italic(),
            stdout: Style::new().color256(244),
            stderr: Style::new().red(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            rule: Style::new(),
            command: Style::new(),
            stdout: Style::new(),
            stderr: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in yellow).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format the application banner: bold name, dim tagline.
    pub fn format_header(&self, name: &str, tagline: &str) -> String {
        if tagline.is_empty() {
            return format!("{}", self.header.apply_to(name));
        }
        format!(
            "{} {}",
            self.header.apply_to(name),
            self.dim.apply_to(format!("- {}", tagline))
        )
    }

    /// Format a centered horizontal rule `width` columns wide.
    pub fn format_rule(&self, title: &str, width: usize) -> String {
        let label = format!(" {} ", title);
        let label_width = measure_text_width(&label);
        if width < label_width + 2 {
            return title.to_string();
        }
        let left = (width - label_width) / 2;
        let right = width - label_width - left;
        format!(
            "{}{}{}",
            self.rule.apply_to("─".repeat(left)),
            label,
            self.rule.apply_to("─".repeat(right))
        )
    }

    /// Format a command echoed before it runs.
    pub fn format_command(&self, command: &str) -> String {
        format!("{}", self.command.apply_to(format!("$ {}", command)))
    }

    /// Format a relayed output line: stdout grey, stderr red.
    pub fn format_output_line(&self, line: &OutputLine) -> String {
        let style = if line.is_stderr() {
            &self.stderr
        } else {
            &self.stdout
        };
        format!("{}", style.apply_to(line.text()))
    }
}

/// Check if colors should be enabled.
///
/// `no_color` already folds in `NO_COLOR`; see `Cli::color_disabled`.
pub fn should_use_colors(no_color: bool) -> bool {
    !no_color && console::Term::stdout().is_term()
}
