//! Relay captured command output to a user interface.

use crate::shell::{LineSink, OutputLine};

use super::UserInterface;

/// A [`LineSink`] that prints each line through a [`UserInterface`].
///
/// The UI decides styling (stdout grey, stderr red) and whether the
/// current output mode shows command output at all.
pub struct UiRelay<'a> {
    ui: &'a mut dyn UserInterface,
}

impl<'a> UiRelay<'a> {
    pub fn new(ui: &'a mut dyn UserInterface) -> Self {
        Self { ui }
    }
}

impl LineSink for UiRelay<'_> {
    fn on_line(&mut self, line: &OutputLine) {
        self.ui.command_output(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn relay_forwards_lines_in_order() {
        let mut ui = MockUI::new();
        {
            let mut relay = UiRelay::new(&mut ui);
            relay.on_line(&OutputLine::Stdout("Tool 'snitch' was installed.".to_string()));
            relay.on_line(&OutputLine::Stderr("warning".to_string()));
        }

        assert_eq!(
            ui.output(),
            [
                OutputLine::Stdout("Tool 'snitch' was installed.".to_string()),
                OutputLine::Stderr("warning".to_string()),
            ]
        );
    }
}
