//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use unarc_core::ProgressSink;

/// CLI progress bar wrapper implementing [`ProgressSink`].
///
/// The engine reports whole percentages, so the bar runs 0 to 100 and
/// moves to whatever value arrives. Cleans up after itself on drop.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a progress bar with the given message (e.g. "Extracting").
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(message.to_string());
        Self { bar }
    }

    /// Returns whether a bar should be drawn (stdout is a terminal).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for CliProgress {
    fn on_progress(&mut self, percent: u8) {
        self.bar.set_position(u64::from(percent));
        if percent == 100 {
            self.bar.finish_and_clear();
        }
    }
}
