//! Color-related environment overrides for child processes.
//!
//! Tools such as `git` decide whether to colorize by probing the terminal
//! or the environment. A passthrough child writes straight to our terminal,
//! so we nudge it with `FORCE_COLOR` unless the user asked for no color.

use std::collections::BTreeMap;

use super::command::ExecutionMode;

/// Variable that disables color (<https://no-color.org/>).
pub const NO_COLOR: &str = "NO_COLOR";

/// Variable that forces color even when stdout is not detected as a TTY.
pub const FORCE_COLOR: &str = "FORCE_COLOR";

/// Compute the overrides applied on top of a spec's own environment.
///
/// `spec_env` wins over anything computed here; `lookup` reads the
/// inherited environment.
pub fn color_overrides(
    mode: ExecutionMode,
    spec_env: &BTreeMap<String, String>,
    disable_color: bool,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Vec<(String, String)> {
    if spec_env.contains_key(NO_COLOR) {
        return Vec::new();
    }

    if disable_color {
        return vec![(NO_COLOR.to_string(), "1".to_string())];
    }

    match mode {
        ExecutionMode::Captured => Vec::new(),
        ExecutionMode::Passthrough => {
            if lookup(NO_COLOR).is_some() || spec_env.contains_key(FORCE_COLOR) {
                Vec::new()
            } else {
                vec![(FORCE_COLOR.to_string(), "1".to_string())]
            }
        }
    }
}
