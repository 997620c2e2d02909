//! Output formatting and status reporting

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Verbosity;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Status reporter writing to stderr, so that stdout carries only the report
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    spinner: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Verbosity level
    pub verbosity: Verbosity,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, Verbosity::Normal)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, verbosity: Verbosity) -> Self {
        Self {
            term: Term::stderr(),
            spinner: None,
            use_color,
            verbosity,
        }
    }

    /// Start a spinner for a long-running step (verbose mode only)
    pub fn start_spinner(&mut self, message: &str) {
        if !self.verbosity.is_verbose() {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    /// Stop the spinner, if any
    pub fn finish_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    /// Print a status message (verbose mode only)
    pub fn status(&self, message: &str) {
        if !self.verbosity.is_verbose() {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.verbosity.is_quiet() {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.verbosity.is_quiet() {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message, even in quiet mode
    pub fn failure(&self, message: &str) {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "ERROR".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod output_format_tests {
        use super::*;

        #[test]
        fn test_default_format() {
            assert_eq!(OutputFormat::default(), OutputFormat::Text);
        }

        #[test]
        fn test_serialize_format() {
            let json = serde_json::to_string(&OutputFormat::Json).unwrap();
            assert_eq!(json, "\"Json\"");
        }
    }

    mod reporter_tests {
        use super::*;

        #[test]
        fn test_default_reporter() {
            let reporter = Reporter::default();
            assert!(reporter.use_color);
            assert_eq!(reporter.verbosity, Verbosity::Normal);
        }

        #[test]
        fn test_spinner_skipped_unless_verbose() {
            let mut reporter = Reporter::new(false, Verbosity::Normal);
            reporter.start_spinner("loading");
            assert!(reporter.spinner.is_none());
            reporter.finish_spinner();
        }

        #[test]
        fn test_spinner_lifecycle() {
            let mut reporter = Reporter::new(false, Verbosity::Verbose);
            reporter.start_spinner("loading");
            assert!(reporter.spinner.is_some());
            reporter.finish_spinner();
            assert!(reporter.spinner.is_none());
        }

        #[test]
        fn test_messages_do_not_panic() {
            for verbosity in [Verbosity::Quiet, Verbosity::Normal, Verbosity::Trace] {
                let reporter = Reporter::new(false, verbosity);
                reporter.status("status");
                reporter.success("done");
                reporter.warning("careful");
                reporter.failure("broken");
            }
        }
    }
}
