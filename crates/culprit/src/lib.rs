//! Culprit: Spectrum-Based Fault Localization
//!
//! Given which program elements each test executed and whether each test
//! passed, Culprit scores every element's suspiciousness with a classic SBFL
//! formula and ranks the elements from most to least suspicious.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌───────────┐   ┌────────┐   ┌──────────┐
//! │ Coverage     │──►│ aggregate  │──►│ Technique │──►│ rank   │──►│ assemble │
//! │ Matrix       │   │ (ep, ef)   │   │ ::score   │   │ (dense)│   │ report   │
//! └──────┬───────┘   └────────────┘   └───────────┘   └────────┘   └──────────┘
//!        │           ┌─────────────────────┐
//!        └──────────►│ DiagnosticsReport   │
//!                    └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use culprit::{localize, CoverageMatrix, OutputLimit, Technique};
//!
//! let matrix: CoverageMatrix = "1 0 1 +\n0 1 1 +\n1 1 0 -\n".parse().unwrap();
//! let result = localize(&matrix, Technique::Ochiai);
//! assert_eq!(result.ranks.ranks(), &[1, 1, 2]);
//!
//! let labels = vec!["A:1".to_string(), "A:2".to_string(), "B:7".to_string()];
//! let lines = result.report(&labels, OutputLimit::Top(1)).unwrap();
//! assert_eq!(lines[0].to_string(), "Rank: 1 | Suspiciousness: 0.7071 | A:1");
//! ```

#![warn(missing_docs)]

pub mod diagnostics;
mod localize;
mod matrix;
pub mod rank;
mod report;
mod result;
mod spectra;
pub mod spectrum;
pub mod technique;

pub use diagnostics::{render_diagnostics_json, render_diagnostics_report, DiagnosticsReport};
pub use localize::{localize, Localization};
pub use matrix::{CoverageMatrix, Outcome};
pub use rank::{rank, RankVector};
pub use report::{assemble, render_report_json, render_report_text, OutputLimit, ReportLine};
pub use result::{CulpritError, CulpritResult};
pub use spectra::{load_spectra, parse_spectra};
pub use spectrum::{aggregate, ElementCounts, ElementStats};
pub use technique::Technique;
