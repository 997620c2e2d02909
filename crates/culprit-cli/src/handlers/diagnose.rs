//! Diagnose command handler

use crate::commands::DiagnoseArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{OutputFormat, Reporter};
use culprit::{
    render_diagnostics_json, render_diagnostics_report, CoverageMatrix, DiagnosticsReport,
};

use tracing::debug;

use super::{emit, require_file};

/// Render a diagnostics report in the requested format
#[must_use]
pub fn render_diagnostics(report: &DiagnosticsReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_diagnostics_report(report),
        OutputFormat::Json => {
            let mut json = render_diagnostics_json(report);
            json.push('\n');
            json
        }
    }
}

/// Execute the diagnose command
///
/// # Errors
/// Fails on a missing or malformed matrix, or an unwritable output file.
pub fn execute_diagnose(config: &CliConfig, args: &DiagnoseArgs) -> CliResult<()> {
    require_file(&args.matrix, "Matrix")?;
    let reporter = Reporter::new(config.color.should_color(), config.verbosity);

    reporter.status(&format!("Loading matrix from {}", args.matrix.display()));
    let matrix = CoverageMatrix::load(&args.matrix)?;
    let report = DiagnosticsReport::from_matrix(&matrix);
    debug!(
        tests = report.num_tests,
        elements = report.num_elements,
        visited = report.num_visited_elements,
        "diagnostics computed"
    );
    if report.num_tests == 0 || report.num_elements == 0 {
        reporter.warning("Matrix is empty; ratio diagnostics are NaN");
    }

    emit(
        &render_diagnostics(&report, args.format.into()),
        args.output.as_deref(),
        &reporter,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::FormatArg;
    use crate::config::Verbosity;
    use tempfile::TempDir;

    fn run(matrix: &str, format: FormatArg) -> String {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("matrix.txt");
        let out = dir.path().join("out");
        std::fs::write(&path, matrix).unwrap();
        let args = DiagnoseArgs {
            matrix: path,
            output: Some(out.clone()),
            format,
        };
        let config = CliConfig::new().with_verbosity(Verbosity::Quiet);
        execute_diagnose(&config, &args).unwrap();
        std::fs::read_to_string(out).unwrap()
    }

    #[test]
    fn test_text_report() {
        let text = run("1 0 1 +\n0 1 1 +\n1 1 0 -\n", FormatArg::Text);
        assert!(text.starts_with("Matrix shape: 3 tests x 3 elements\n"));
        assert!(text.contains("Failing tests"));
        assert!(text.contains("0.6667"));
    }

    #[test]
    fn test_json_report() {
        let json = run("1 0 +\n0 0 -\n", FormatArg::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["num_tests"], 2);
        assert_eq!(value["num_visited_elements"], 1);
        assert_eq!(value["coverage"], 0.5);
    }

    #[test]
    fn test_empty_matrix_degrades_to_nan() {
        let text = run("\n", FormatArg::Text);
        assert!(text.starts_with("Matrix shape: 0 tests x 0 elements\n"));
        assert!(text.contains("NaN"));
    }

    #[test]
    fn test_missing_matrix() {
        let args = DiagnoseArgs {
            matrix: "/no/such/matrix".into(),
            output: None,
            format: FormatArg::Text,
        };
        let err = execute_diagnose(&CliConfig::new(), &args).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
