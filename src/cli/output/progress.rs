//! Progress bar utilities using indicatif for terminal output

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const PROGRESS_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

/// Progress bar characters for visual effect
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Create a standard progress bar drawn on stderr
///
/// # Example
/// ```
/// use docrag::cli::output::progress::create_progress_bar;
///
/// let pb = create_progress_bar(4);
/// for i in 0..4 {
///     pb.set_message(format!("document {i}"));
///     pb.inc(1);
/// }
/// pb.finish_with_message("done");
/// ```
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(PROGRESS_CHARS);

    let pb = ProgressBar::new(total);
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Progress bar for a command: hidden in JSON mode so stdout stays parseable.
pub fn progress_for(total: u64, json_mode: bool) -> ProgressBar {
    if json_mode {
        ProgressBar::hidden()
    } else {
        create_progress_bar(total)
    }
}

/// Extension trait for ProgressBar to add common utility methods
pub trait ProgressBarExt {
    /// Finish with a success message (green checkmark)
    fn finish_success(&self, message: impl Into<String>);

    /// Finish with an error message (red X)
    fn finish_error(&self, message: impl Into<String>);
}

impl ProgressBarExt for ProgressBar {
    fn finish_success(&self, message: impl Into<String>) {
        self.finish_with_message(format!("✓ {}", message.into()));
    }

    fn finish_error(&self, message: impl Into<String>) {
        self.abandon_with_message(format!("✗ {}", message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(4);
        assert_eq!(pb.length(), Some(4));
        pb.inc(2);
        assert_eq!(pb.position(), 2);
        pb.finish_success("done");
        assert!(pb.is_finished());
    }

    #[test]
    fn test_progress_hidden_in_json_mode() {
        let pb = progress_for(3, true);
        assert!(pb.is_hidden());
        pb.finish_error("failed");
    }
}
