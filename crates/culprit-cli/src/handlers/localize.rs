//! Localize command handler

use crate::commands::LocalizeArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{OutputFormat, Reporter};
use culprit::{
    load_spectra, localize, render_report_json, render_report_text, CoverageMatrix, OutputLimit,
    ReportLine, Technique,
};
use tracing::{debug, warn};

use super::{emit, require_file};

/// Validated localize options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizeRequest {
    /// Scoring technique
    pub technique: Technique,
    /// Which ranked lines to keep
    pub limit: OutputLimit,
    /// Report format
    pub format: OutputFormat,
}

/// Check every argument before any file is parsed
///
/// # Errors
/// Fails on a missing input file, an unknown technique, or conflicting limits.
pub fn verify_localize_input(args: &LocalizeArgs) -> CliResult<LocalizeRequest> {
    require_file(&args.matrix, "Matrix")?;
    require_file(&args.spectra, "Spectra")?;
    let technique: Technique = args.technique.parse()?;
    let limit = OutputLimit::from_options(args.top, args.max_rank)?;
    Ok(LocalizeRequest {
        technique,
        limit,
        format: args.format.into(),
    })
}

/// Render report lines in the requested format
#[must_use]
pub fn render_lines(lines: &[ReportLine], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_report_text(lines),
        OutputFormat::Json => {
            let mut json = render_report_json(lines);
            json.push('\n');
            json
        }
    }
}

/// Execute the localize command
///
/// # Errors
/// Fails on invalid arguments, malformed input, or an unwritable output file.
pub fn execute_localize(config: &CliConfig, args: &LocalizeArgs) -> CliResult<()> {
    let request = verify_localize_input(args)?;
    debug!(
        matrix = %args.matrix.display(),
        spectra = %args.spectra.display(),
        technique = %request.technique,
        limit = ?request.limit,
        "localize request validated"
    );
    let mut reporter = Reporter::new(config.color.should_color(), config.verbosity);

    reporter.status(&format!("Loading matrix from {}", args.matrix.display()));
    reporter.start_spinner("Loading coverage data");
    let matrix = CoverageMatrix::load(&args.matrix);
    let descriptions = load_spectra(&args.spectra);
    reporter.finish_spinner();
    let (matrix, descriptions) = (matrix?, descriptions?);

    let (tests, elements) = matrix.shape();
    reporter.status(&format!(
        "Scoring {elements} elements over {tests} tests with {}",
        request.technique
    ));

    let result = localize(&matrix, request.technique);
    if result.stats.total_failed == 0 {
        warn!(tests, "matrix has no failing tests");
        reporter.warning("No failing tests in the matrix; suspiciousness is not meaningful");
    }

    let lines = result.report(&descriptions, request.limit)?;
    reporter.status(&format!("Reporting {} of {elements} elements", lines.len()));

    emit(
        &render_lines(&lines, request.format),
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
    use crate::error::CliError;
    use culprit::CulpritError;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const MATRIX: &str = "1 0 1 +\n0 1 1 +\n1 1 0 -\n";
    const SPECTRA: &str = "A:1\nA:2\nB:7\n";

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("matrix.txt"), MATRIX).unwrap();
        std::fs::write(dir.path().join("spectra.txt"), SPECTRA).unwrap();
        dir
    }

    fn args(dir: &Path, technique: &str) -> LocalizeArgs {
        LocalizeArgs {
            matrix: dir.join("matrix.txt"),
            spectra: dir.join("spectra.txt"),
            technique: technique.to_string(),
            top: None,
            max_rank: None,
            output: None,
            format: FormatArg::Text,
        }
    }

    fn quiet() -> CliConfig {
        CliConfig::new().with_verbosity(Verbosity::Quiet)
    }

    mod verify_tests {
        use super::*;

        #[test]
        fn test_valid_request() {
            let dir = fixture();
            let request = verify_localize_input(&args(dir.path(), "ochiai")).unwrap();
            assert_eq!(request.technique, Technique::Ochiai);
            assert_eq!(request.limit, OutputLimit::All);
            assert_eq!(request.format, OutputFormat::Text);
        }

        #[test]
        fn test_missing_matrix() {
            let dir = fixture();
            let mut a = args(dir.path(), "ochiai");
            a.matrix = PathBuf::from("/definitely/not/here.txt");
            let err = verify_localize_input(&a).unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }));
            assert!(err.to_string().contains("Matrix file"));
        }

        #[test]
        fn test_missing_spectra() {
            let dir = fixture();
            let mut a = args(dir.path(), "ochiai");
            a.spectra = dir.path().join("missing.txt");
            let err = verify_localize_input(&a).unwrap_err();
            assert!(err.to_string().contains("Spectra file"));
        }

        #[test]
        fn test_unknown_technique() {
            let dir = fixture();
            let err = verify_localize_input(&args(dir.path(), "foo")).unwrap_err();
            assert!(matches!(
                err,
                CliError::Culprit(CulpritError::UnsupportedTechnique { .. })
            ));
            assert!(err.to_string().starts_with("foo is not a valid technique"));
        }

        #[test]
        fn test_conflicting_limits() {
            let dir = fixture();
            let mut a = args(dir.path(), "ochiai");
            a.top = Some(2);
            a.max_rank = Some(1);
            let err = verify_localize_input(&a).unwrap_err();
            assert!(matches!(
                err,
                CliError::Culprit(CulpritError::ConflictingLimit { .. })
            ));
        }

        #[test]
        fn test_zero_top_rejected() {
            let dir = fixture();
            let mut a = args(dir.path(), "ochiai");
            a.top = Some(0);
            assert!(verify_localize_input(&a).is_err());
        }
    }

    mod execute_tests {
        use super::*;

        #[test]
        fn test_writes_text_report() {
            let dir = fixture();
            let out = dir.path().join("report.txt");
            let mut a = args(dir.path(), "ochiai");
            a.output = Some(out.clone());
            execute_localize(&quiet(), &a).unwrap();
            let report = std::fs::read_to_string(out).unwrap();
            assert_eq!(
                report,
                "Rank: 1 | Suspiciousness: 0.7071 | A:1\n\
                 Rank: 1 | Suspiciousness: 0.7071 | A:2\n\
                 Rank: 2 | Suspiciousness: 0.0000 | B:7\n"
            );
        }

        #[test]
        fn test_writes_json_report() {
            let dir = fixture();
            let out = dir.path().join("report.json");
            let mut a = args(dir.path(), "jaccard");
            a.output = Some(out.clone());
            a.format = FormatArg::Json;
            a.max_rank = Some(1);
            execute_localize(&quiet(), &a).unwrap();
            let value: serde_json::Value =
                serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
            let lines = value.as_array().unwrap();
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[0]["rank"], 1);
            assert_eq!(lines[0]["description"], "A:1");
        }

        #[test]
        fn test_spectra_mismatch() {
            let dir = fixture();
            std::fs::write(dir.path().join("spectra.txt"), "A:1\nA:2\n").unwrap();
            let err = execute_localize(&quiet(), &args(dir.path(), "ochiai")).unwrap_err();
            assert!(err.to_string().contains("spectra lists 2 elements"));
        }

        #[test]
        fn test_malformed_matrix() {
            let dir = fixture();
            std::fs::write(dir.path().join("matrix.txt"), "1 0 +\n1 x\n").unwrap();
            let err = execute_localize(&quiet(), &args(dir.path(), "ochiai")).unwrap_err();
            assert!(matches!(
                err,
                CliError::Culprit(CulpritError::MalformedInput { .. })
            ));
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_nan_text() {
            let lines = vec![ReportLine {
                element: 0,
                rank: 1,
                score: f64::NAN,
                description: "X:1".to_string(),
            }];
            assert_eq!(
                render_lines(&lines, OutputFormat::Text),
                "Rank: 1 | Suspiciousness: NaN | X:1\n"
            );
        }

        #[test]
        fn test_render_empty_json() {
            assert_eq!(render_lines(&[], OutputFormat::Json), "[]\n");
        }
    }
}
