//! # Progress Display Module
//!
//! Spinner `indicatif` mostrato durante la conversione. Le righe di log
//! vengono stampate sopra lo spinner, che mostra la passata corrente.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages the terminal spinner for a running conversion
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a spinner for indeterminate progress
    pub fn spinner(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);

        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Hidden manager, for non-interactive output
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Print a log line above the spinner; pass banners also become the spinner message
    pub fn log_line(&self, line: &str) {
        if line.starts_with("[Pass ") {
            self.bar.set_message(line.to_string());
        }
        self.bar.println(line);
    }

    /// Set a custom message
    #[cfg(test)]
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    #[cfg(test)]
    pub fn message(&self) -> String {
        self.bar.message()
    }
}
