//! Command handlers
//!
//! Each handler module contains the execution logic for one CLI command,
//! its pure helpers, and tests.

pub mod diagnose;
pub mod localize;
pub mod techniques;

pub use diagnose::{execute_diagnose, render_diagnostics};
pub use localize::{execute_localize, render_lines, verify_localize_input, LocalizeRequest};
pub use techniques::{execute_techniques, render_techniques};

use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use std::path::Path;

/// Print a rendered report to stdout, or write it to `output` when given
pub fn emit(rendered: &str, output: Option<&Path>, reporter: &Reporter) -> CliResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|e| {
                CliError::report_generation(format!("cannot write {}: {e}", path.display()))
            })?;
            reporter.success(&format!("Report written to {}", path.display()));
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Fail early with `InvalidArgument` when an input file is missing
pub fn require_file(path: &Path, what: &str) -> CliResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::invalid_argument(format!(
            "{what} file {} does not exist",
            path.display()
        )))
    }
}
