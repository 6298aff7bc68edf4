use super::ui;
use crate::core::{ConverterError, ErrorKind, Renderer};
use indicatif::ProgressBar;
use std::sync::Mutex;

/// Renders conversions to stdout and notifications to stderr.
#[derive(Default)]
pub struct TerminalRenderer {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner
            .lock()
            .map(|spinner| spinner.is_some())
            .unwrap_or(false)
    }

    /// Runs `print` with the spinner hidden so output lines are not garbled.
    fn without_spinner(&self, print: impl FnOnce()) {
        match self.spinner.lock() {
            Ok(spinner) => match spinner.as_ref() {
                Some(active) => active.suspend(print),
                None => print(),
            },
            Err(_) => print(),
        }
    }
}

impl Renderer for TerminalRenderer {
    fn set_result(&self, value: &str) {
        let line = format!(
            "Result: {}",
            ui::style_text(value, ui::StyleType::ResultValue)
        );
        self.without_spinner(|| println!("{line}"));
    }

    fn set_rate_info(&self, summary: &str) {
        let line = ui::style_text(summary, ui::StyleType::Subtle);
        self.without_spinner(|| println!("{line}"));
    }

    fn set_busy(&self, busy: bool) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };
        if busy {
            if spinner.is_none() {
                *spinner = Some(ui::new_spinner("Fetching exchange rate..."));
            }
        } else if let Some(active) = spinner.take() {
            active.finish_and_clear();
        }
    }

    fn notify_error(&self, error: &ConverterError) {
        let label = match error.kind() {
            ErrorKind::Validation => "Invalid input",
            ErrorKind::Provider => "Error",
        };
        let line = ui::style_text(&format!("{label}: {}", error.message()), ui::StyleType::Error);
        self.without_spinner(|| eprintln!("{line}"));
    }
}
