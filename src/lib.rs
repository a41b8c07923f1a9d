//! # validate-pdfa Library
//!
//! An async Rust library for validating PDF documents against PDF/A
//! conformance profiles by driving an external veraPDF-style engine,
//! parsing its machine-readable report, and aggregating rule violations
//! across documents.

pub mod cli;
pub mod error;
pub mod extract;
pub mod file_discovery;
pub mod invoker;
pub mod output;
pub mod report;
pub mod stabilize;
pub mod tally;
pub mod validator;

pub use cli::{Cli, Config, VerbosityLevel};
pub use error::{Result, ValidationError};
pub use extract::{SUMMARY_TAG, VALIDATION_REPORT_TAG, extract};
pub use file_discovery::FileDiscovery;
pub use invoker::invoke;
pub use output::{Output, render_json};
pub use report::{
    ReportDetails, RuleFamily, RuleViolation, ValidationReport, parse_report,
};
pub use stabilize::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL, stabilize};
pub use tally::{ViolationCount, ViolationTally};
pub use validator::{
    FileValidationResult, ValidationConfig, ValidationEngine, ValidationResults, ValidationStatus,
};
